//! Profile form: field registration, focus, validation and submit/reset

use super::coerce::{renders_as_digits, Coerced};
use super::field::FormField;
use super::field_array::FieldArray;
use super::mode::{FieldEvent, ValidationTiming};
use super::rules::{FieldError, Rules};
use super::values::{Address, FormValues, Gender, Hobby, MobileNumbers};
use std::sync::OnceLock;
use thiserror::Error;
use uuid::Uuid;

/// Trait for common form operations
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
    fn get_active_field_mut(&mut self) -> Option<&mut FormField>;
    fn get_field(&self, index: usize) -> Option<&FormField>;
}

/// Errors from form-level operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("the first hobby has no remove control")]
    FirstHobbyNotRemovable,
    #[error("no hobby at position {0}")]
    NoSuchHobby(usize),
}

/// Why a submit did not reach the handler
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("a submission is already in progress")]
    AlreadySubmitting,
    #[error("{count} field(s) failed validation")]
    Invalid { count: usize },
    #[error("field {0} could not be coerced")]
    Coercion(&'static str),
}

/// Scalar fields of the profile form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldId {
    Name,
    Email,
    Password,
    PrimaryMobile,
    AlternateMobile,
    Age,
    Gender,
    Date,
    City,
    Area,
    DoorNum,
    Pincode,
}

impl FieldId {
    /// Fields shown above the hobby list
    const HEAD: [FieldId; 8] = [
        FieldId::Name,
        FieldId::Email,
        FieldId::Password,
        FieldId::PrimaryMobile,
        FieldId::AlternateMobile,
        FieldId::Age,
        FieldId::Gender,
        FieldId::Date,
    ];
    /// Address fields shown below the hobby list
    const TAIL: [FieldId; 4] = [
        FieldId::City,
        FieldId::Area,
        FieldId::DoorNum,
        FieldId::Pincode,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            FieldId::Name => "name",
            FieldId::Email => "email",
            FieldId::Password => "password",
            FieldId::PrimaryMobile => "mobileNumbers.0",
            FieldId::AlternateMobile => "mobileNumbers.1",
            FieldId::Age => "age",
            FieldId::Gender => "gender",
            FieldId::Date => "date",
            FieldId::City => "address.city",
            FieldId::Area => "address.area",
            FieldId::DoorNum => "address.doorNum",
            FieldId::Pincode => "address.pincode",
        }
    }

    fn slot(&self) -> usize {
        *self as usize
    }

    /// Register the field with its label, default and rules
    fn register(&self) -> FormField {
        match self {
            FieldId::Name => FormField::text(self.path(), "Name")
                .with_placeholder("full name")
                .with_rules(
                    Rules::new()
                        .required("name is required")
                        .min_length(4, "name should be atleast 4 char"),
                ),
            FieldId::Email => FormField::text(self.path(), "Email")
                .with_placeholder("email")
                .with_rules(
                    Rules::new()
                        .required("Email is required")
                        .pattern(is_email, "invalid email"),
                ),
            FieldId::Password => FormField::secret(self.path(), "Password")
                .with_placeholder("password")
                .with_rules(
                    Rules::new()
                        .required("please enter password")
                        .pattern(is_strong_password, "password is not strong"),
                ),
            FieldId::PrimaryMobile => FormField::number(self.path(), "Primary mobile number")
                .with_placeholder("mobile number")
                .with_rules(
                    Rules::new()
                        .required("number is required")
                        .validate(check_primary_mobile),
                ),
            FieldId::AlternateMobile => {
                FormField::number(self.path(), "Alternate mobile number")
                    .with_placeholder("mobile number")
                    .with_rules(Rules::new().validate(check_alternate_mobile))
            }
            FieldId::Age => FormField::number(self.path(), "Age")
                .with_placeholder("age")
                .with_default("2")
                .with_rules(Rules::new().validate(check_age)),
            FieldId::Gender => FormField::choice(self.path(), "Gender", Gender::OPTIONS)
                .with_default(Gender::default().as_str()),
            FieldId::Date => FormField::date(self.path(), "Date")
                .with_rules(Rules::new().required("select a date").validate(check_date)),
            FieldId::City => {
                FormField::text(self.path(), "City/Town").with_placeholder("city/town")
            }
            FieldId::Area => {
                FormField::text(self.path(), "Area").with_placeholder("area, street, village")
            }
            FieldId::DoorNum => {
                FormField::text(self.path(), "House no.").with_placeholder("Flat, House no.")
            }
            FieldId::Pincode => FormField::number(self.path(), "Pincode")
                .with_placeholder("pincode")
                .with_rules(
                    Rules::new()
                        .required("enter a pincode")
                        .validate(check_pincode),
                ),
        }
    }
}

/// A focusable row of the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    Field(FieldId),
    Hobby(usize),
    AddHobby,
    Submit,
    Reset,
}

fn email_regex() -> &'static regex::Regex {
    static RE: OnceLock<regex::Regex> = OnceLock::new();
    RE.get_or_init(|| {
        regex::Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}")
            .expect("email pattern compiles")
    })
}

fn password_regex() -> &'static regex::Regex {
    static RE: OnceLock<regex::Regex> = OnceLock::new();
    RE.get_or_init(|| {
        regex::Regex::new(r"^[a-zA-Z0-9!@#$%^&*]{6,16}$").expect("password pattern compiles")
    })
}

const PASSWORD_SYMBOLS: &str = "!@#$%^&*";

/// Unanchored search for a `local@domain.tld` shape
pub fn is_email(raw: &str) -> bool {
    email_regex().is_match(raw)
}

/// 6-16 chars from the allowed set with at least one digit and one symbol
pub fn is_strong_password(raw: &str) -> bool {
    password_regex().is_match(raw)
        && raw.chars().any(|c| c.is_ascii_digit())
        && raw.chars().any(|c| PASSWORD_SYMBOLS.contains(c))
}

fn check_primary_mobile(value: &Coerced) -> Option<&'static str> {
    match value.as_number() {
        Some(n) if renders_as_digits(n, 10) => None,
        _ => Some("Enter valid number"),
    }
}

fn check_alternate_mobile(value: &Coerced) -> Option<&'static str> {
    match value {
        Coerced::Empty => None,
        other if other.as_number().is_some() => None,
        _ => Some("enter valid number"),
    }
}

fn check_age(value: &Coerced) -> Option<&'static str> {
    match value.as_number() {
        Some(age) if age < 18.0 => Some("should be atleast 18 years old"),
        _ => None,
    }
}

fn check_date(value: &Coerced) -> Option<&'static str> {
    match value {
        Coerced::Date(None) => Some("enter a valid date (YYYY-MM-DD)"),
        _ => None,
    }
}

fn check_pincode(value: &Coerced) -> Option<&'static str> {
    match value.as_number() {
        Some(n) if renders_as_digits(n, 6) => None,
        _ => Some("Enter valid pincode"),
    }
}

fn hobby_field(index: usize) -> FormField {
    let mut field = FormField::text("", "").with_placeholder("hobby");
    name_hobby(&mut field, index);
    field
}

fn name_hobby(field: &mut FormField, index: usize) {
    field.name = format!("hobbies.{index}.hobby");
    field.label = format!("Hobby {}", index + 1);
}

/// The profile form
#[derive(Debug, Clone)]
pub struct ProfileForm {
    /// Scalar fields indexed by `FieldId`
    fields: Vec<FormField>,
    pub hobbies: FieldArray<FormField>,
    pub active_field_index: usize,
    pub timing: ValidationTiming,
    /// A submit was attempted since the last reset
    pub is_submitted: bool,
    pub submit_count: u32,
}

impl ProfileForm {
    pub fn new(timing: ValidationTiming) -> Self {
        // HEAD then TAIL lists the ids in discriminant order, so position == slot
        let fields = FieldId::HEAD
            .iter()
            .chain(FieldId::TAIL.iter())
            .map(FieldId::register)
            .collect();

        Self {
            fields,
            hobbies: FieldArray::new([hobby_field(0)]),
            active_field_index: 0,
            timing,
            is_submitted: false,
            submit_count: 0,
        }
    }

    pub fn field(&self, id: FieldId) -> &FormField {
        &self.fields[id.slot()]
    }

    pub fn field_mut(&mut self, id: FieldId) -> &mut FormField {
        &mut self.fields[id.slot()]
    }

    /// Map a focus index to the row it designates
    pub fn target_at(&self, index: usize) -> FocusTarget {
        let head = FieldId::HEAD.len();
        let hobbies = self.hobbies.len();
        let tail_start = head + hobbies + 1;

        if index < head {
            FocusTarget::Field(FieldId::HEAD[index])
        } else if index < head + hobbies {
            FocusTarget::Hobby(index - head)
        } else if index == head + hobbies {
            FocusTarget::AddHobby
        } else if index < tail_start + FieldId::TAIL.len() {
            FocusTarget::Field(FieldId::TAIL[index - tail_start])
        } else if index == tail_start + FieldId::TAIL.len() {
            FocusTarget::Submit
        } else {
            FocusTarget::Reset
        }
    }

    /// Inverse of `target_at`
    pub fn index_of(&self, target: FocusTarget) -> usize {
        let head = FieldId::HEAD.len();
        let hobbies = self.hobbies.len();
        let tail_start = head + hobbies + 1;

        match target {
            FocusTarget::Field(id) => FieldId::HEAD
                .iter()
                .position(|f| *f == id)
                .or_else(|| {
                    FieldId::TAIL
                        .iter()
                        .position(|f| *f == id)
                        .map(|p| tail_start + p)
                })
                .unwrap_or(0),
            FocusTarget::Hobby(i) => head + i.min(hobbies.saturating_sub(1)),
            FocusTarget::AddHobby => head + hobbies,
            FocusTarget::Submit => tail_start + FieldId::TAIL.len(),
            FocusTarget::Reset => tail_start + FieldId::TAIL.len() + 1,
        }
    }

    pub fn active_target(&self) -> FocusTarget {
        self.target_at(self.active_field_index)
    }

    pub fn focus(&mut self, target: FocusTarget) {
        let index = self.index_of(target);
        self.set_active_field(index);
    }

    fn field_at_mut(&mut self, index: usize) -> Option<&mut FormField> {
        match self.target_at(index) {
            FocusTarget::Field(id) => Some(self.field_mut(id)),
            FocusTarget::Hobby(i) => self.hobbies.get_mut(i).map(|e| &mut e.value),
            _ => None,
        }
    }

    /// Apply timing rules for `event` on the field at `index`
    fn notify(&mut self, index: usize, event: FieldEvent) {
        let timing = self.timing;
        let is_submitted = self.is_submitted;
        if let Some(field) = self.field_at_mut(index) {
            if event == FieldEvent::Blur {
                field.touched = true;
            }
            if timing.should_validate(event, field.touched, is_submitted) {
                let _ = field.validate();
            }
        }
    }

    /// Type a character into the active field
    pub fn input_char(&mut self, c: char) {
        let index = self.active_field_index;
        let changed = match self.get_active_field_mut() {
            Some(field) if field.is_choice() && c == ' ' => field.cycle_choice(true),
            Some(field) => field.push_char(c),
            None => false,
        };
        if changed {
            self.notify(index, FieldEvent::Change);
        }
    }

    /// Delete the last character of the active field
    pub fn backspace(&mut self) {
        let index = self.active_field_index;
        let changed = self
            .get_active_field_mut()
            .map(|f| f.pop_char())
            .unwrap_or(false);
        if changed {
            self.notify(index, FieldEvent::Change);
        }
    }

    /// Cycle the active choice field
    pub fn cycle_choice(&mut self, forward: bool) {
        let index = self.active_field_index;
        let changed = self
            .get_active_field_mut()
            .map(|f| f.cycle_choice(forward))
            .unwrap_or(false);
        if changed {
            self.notify(index, FieldEvent::Change);
        }
    }

    /// Append an empty hobby and focus it
    pub fn append_hobby(&mut self) -> Uuid {
        let id = self.hobbies.append(hobby_field(self.hobbies.len()));
        self.focus(FocusTarget::Hobby(self.hobbies.len() - 1));
        id
    }

    /// Remove the hobby at `index`. Only rows after the first expose a remove control.
    pub fn remove_hobby(&mut self, index: usize) -> Result<Hobby, FormError> {
        if index == 0 {
            return Err(FormError::FirstHobbyNotRemovable);
        }
        let active = self.active_target();
        let removed = self
            .hobbies
            .remove(index)
            .ok_or(FormError::NoSuchHobby(index))?;
        for (i, entry) in self.hobbies.iter_mut().enumerate() {
            name_hobby(&mut entry.value, i);
        }
        tracing::debug!(id = %removed.id, "Removed hobby row {index}");

        let target = match active {
            FocusTarget::Hobby(i) if i >= index => FocusTarget::Hobby(i.saturating_sub(1)),
            other => other,
        };
        self.active_field_index = self.index_of(target);

        Ok(Hobby {
            hobby: removed.value.value().to_string(),
        })
    }

    /// Remove the focused hobby row, if it has a remove control
    pub fn remove_active_hobby(&mut self) -> Result<Hobby, FormError> {
        match self.active_target() {
            FocusTarget::Hobby(i) => self.remove_hobby(i),
            _ => Err(FormError::NoSuchHobby(self.active_field_index)),
        }
    }

    fn all_fields(&self) -> impl Iterator<Item = &FormField> {
        self.fields
            .iter()
            .chain(self.hobbies.iter().map(|e| &e.value))
    }

    fn all_fields_mut(&mut self) -> impl Iterator<Item = &mut FormField> {
        self.fields
            .iter_mut()
            .chain(self.hobbies.iter_mut().map(|e| &mut e.value))
    }

    /// Currently displayed errors, keyed by field path
    pub fn errors(&self) -> impl Iterator<Item = (&str, &FieldError)> {
        self.all_fields()
            .filter_map(|f| f.error.as_ref().map(|e| (f.name.as_str(), e)))
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    /// Any raw value differs from its default, or the hobby list changed length
    pub fn is_dirty(&self) -> bool {
        self.hobbies.len() != 1 || self.all_fields().any(|f| f.is_dirty())
    }

    /// Validate every field; returns true when all rules pass
    pub fn trigger(&mut self) -> bool {
        let mut valid = true;
        for field in self.all_fields_mut() {
            valid &= field.validate().is_ok();
        }
        valid
    }

    /// Validate everything and collect the typed record.
    ///
    /// On failure focus moves to the first failing row.
    pub fn handle_submit(&mut self) -> Result<FormValues, SubmitError> {
        self.is_submitted = true;
        self.submit_count += 1;

        if !self.trigger() {
            let count = self.error_count();
            let first_error = (0..self.field_count())
                .find(|i| self.get_field(*i).is_some_and(|f| f.error.is_some()));
            if let Some(index) = first_error {
                self.active_field_index = index;
            }
            return Err(SubmitError::Invalid { count });
        }

        self.collect()
    }

    fn number(&self, id: FieldId) -> Option<f64> {
        self.field(id).coerced().as_number()
    }

    fn collect(&self) -> Result<FormValues, SubmitError> {
        let text = |id: FieldId| self.field(id).value().to_string();

        let primary = self
            .number(FieldId::PrimaryMobile)
            .ok_or(SubmitError::Coercion(FieldId::PrimaryMobile.path()))?;
        let pincode = self
            .number(FieldId::Pincode)
            .ok_or(SubmitError::Coercion(FieldId::Pincode.path()))?;
        let date = self
            .field(FieldId::Date)
            .coerced()
            .as_date()
            .ok_or(SubmitError::Coercion(FieldId::Date.path()))?;
        let gender = Gender::parse(self.field(FieldId::Gender).value())
            .ok_or(SubmitError::Coercion(FieldId::Gender.path()))?;

        Ok(FormValues {
            name: text(FieldId::Name),
            email: text(FieldId::Email),
            password: text(FieldId::Password),
            mobile_numbers: MobileNumbers(
                primary as u64,
                self.number(FieldId::AlternateMobile),
            ),
            address: Address {
                city: text(FieldId::City),
                pincode: pincode as u64,
                area: text(FieldId::Area),
                door_num: text(FieldId::DoorNum),
            },
            gender,
            age: self.number(FieldId::Age),
            date,
            hobbies: self
                .hobbies
                .iter()
                .map(|e| Hobby {
                    hobby: e.value.value().to_string(),
                })
                .collect(),
        })
    }

    /// Restore every field, the hobby list and the submit flags to defaults
    pub fn reset(&mut self) {
        for field in self.fields.iter_mut() {
            field.reset();
        }
        self.hobbies.replace([hobby_field(0)]);
        self.active_field_index = 0;
        self.is_submitted = false;
        self.submit_count = 0;
    }
}

#[cfg(test)]
impl ProfileForm {
    /// Replace a field's value as if typed, applying change-time validation
    pub fn set_value(&mut self, id: FieldId, value: &str) {
        self.field_mut(id).set_value(value);
        let index = self.index_of(FocusTarget::Field(id));
        self.notify(index, FieldEvent::Change);
    }

    /// Replace a hobby's value
    pub fn set_hobby(&mut self, index: usize, value: &str) -> Result<(), FormError> {
        let entry = self
            .hobbies
            .get_mut(index)
            .ok_or(FormError::NoSuchHobby(index))?;
        entry.value.set_value(value);
        Ok(())
    }
}

impl Default for ProfileForm {
    fn default() -> Self {
        Self::new(ValidationTiming::default())
    }
}

impl Form for ProfileForm {
    fn field_count(&self) -> usize {
        // head fields, hobbies, add-hobby row, address fields, submit, reset
        FieldId::HEAD.len() + self.hobbies.len() + 1 + FieldId::TAIL.len() + 2
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        let index = index.min(self.field_count() - 1);
        if index != self.active_field_index {
            self.notify(self.active_field_index, FieldEvent::Blur);
        }
        self.active_field_index = index;
    }
    fn get_active_field_mut(&mut self) -> Option<&mut FormField> {
        self.field_at_mut(self.active_field_index)
    }
    fn get_field(&self, index: usize) -> Option<&FormField> {
        match self.target_at(index) {
            FocusTarget::Field(id) => Some(self.field(id)),
            FocusTarget::Hobby(i) => self.hobbies.get(i).map(|e| &e.value),
            _ => None,
        }
    }
}
