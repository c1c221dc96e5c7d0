//! Field rules shared by the step controllers and the review step.
//!
//! Each rule returns the first offending field of its slice. Steps use the
//! same rules for their disabled state and for the check on "Next", so the
//! two can never disagree.

use std::fmt;

use crate::config::DraftLimits;
use crate::domain::{BudgetKind, Location, ProviderChoice, ProviderSelection, Timing, TimingKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftField {
    Category,
    Title,
    Description,
    City,
    Images,
    TimingDay,
    TimingSlot,
    BudgetType,
    BudgetAmount,
    HourlyRate,
    Provider,
    Group,
}

impl DraftField {
    pub fn label(self) -> &'static str {
        match self {
            DraftField::Category => "Category",
            DraftField::Title => "Title",
            DraftField::Description => "Description",
            DraftField::City => "City",
            DraftField::Images => "Images",
            DraftField::TimingDay => "Day",
            DraftField::TimingSlot => "Time slot",
            DraftField::BudgetType => "Budget type",
            DraftField::BudgetAmount => "Fixed amount",
            DraftField::HourlyRate => "Hourly rate",
            DraftField::Provider => "Provider",
            DraftField::Group => "Group",
        }
    }
}

/// Field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    pub field: DraftField,
    pub message: String,
}

impl FieldIssue {
    pub fn new(field: DraftField, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field.label(), self.message)
    }
}

/// Every issue found by one validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    issues: Vec<FieldIssue>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check(&mut self, outcome: Result<(), FieldIssue>) {
        if let Err(issue) = outcome {
            self.issues.push(issue);
        }
    }

    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn issues(&self) -> &[FieldIssue] {
        &self.issues
    }

    pub fn fields(&self) -> Vec<DraftField> {
        self.issues.iter().map(|issue| issue.field).collect()
    }

    pub fn mentions(&self, field: DraftField) -> bool {
        self.issues.iter().any(|issue| issue.field == field)
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .issues
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        f.write_str(&joined)
    }
}

pub fn check_category(category: Option<&str>, catalog: &[String]) -> Result<(), FieldIssue> {
    let Some(category) = category.map(str::trim).filter(|value| !value.is_empty()) else {
        return Err(FieldIssue::new(DraftField::Category, "Choose a service category"));
    };
    if !catalog.is_empty()
        && !catalog
            .iter()
            .any(|known| known.eq_ignore_ascii_case(category))
    {
        return Err(FieldIssue::new(
            DraftField::Category,
            format!("Unknown category `{}`", category),
        ));
    }
    Ok(())
}

fn check_text(field: DraftField, value: &str, max_len: usize) -> Result<(), FieldIssue> {
    let trimmed = value.trim();
    let count = trimmed.chars().count();
    if count == 0 {
        Err(FieldIssue::new(field, format!("{} is required", field.label())))
    } else if count > max_len {
        Err(FieldIssue::new(
            field,
            format!(
                "{} cannot exceed {} characters (got {})",
                field.label(),
                max_len,
                count
            ),
        ))
    } else {
        Ok(())
    }
}

pub fn check_title(title: &str, limits: &DraftLimits) -> Result<(), FieldIssue> {
    check_text(DraftField::Title, title, limits.title_max_len)
}

pub fn check_description(description: &str, limits: &DraftLimits) -> Result<(), FieldIssue> {
    check_text(DraftField::Description, description, limits.description_max_len)
}

pub fn check_location(location: &Location, limits: &DraftLimits) -> Result<(), FieldIssue> {
    if location.city.trim().is_empty() {
        return Err(FieldIssue::new(DraftField::City, "City is required"));
    }
    if location.images.len() > limits.max_images {
        return Err(FieldIssue::new(
            DraftField::Images,
            format!(
                "At most {} images can be attached (got {})",
                limits.max_images,
                location.images.len()
            ),
        ));
    }
    Ok(())
}

pub fn check_timing(timing: &Timing) -> Result<(), FieldIssue> {
    if timing.kind == TimingKind::Urgent {
        return Ok(());
    }
    if timing.day.trim().is_empty() {
        return Err(FieldIssue::new(
            DraftField::TimingDay,
            "Choose a day for flexible timing",
        ));
    }
    if timing.time_slot.trim().is_empty() {
        return Err(FieldIssue::new(
            DraftField::TimingSlot,
            "Choose a time slot for flexible timing",
        ));
    }
    Ok(())
}

/// Budget rule. `amount` and `hourly_rate` are `None` when the user left the
/// field blank or typed something that is not a number.
pub fn check_budget(
    has_budget: bool,
    kind: BudgetKind,
    amount: Option<f64>,
    hourly_rate: Option<f64>,
) -> Result<(), FieldIssue> {
    if !has_budget {
        return Ok(());
    }
    match kind {
        BudgetKind::Unset => Err(FieldIssue::new(
            DraftField::BudgetType,
            "Choose fixed or hourly",
        )),
        BudgetKind::Fixed => match amount {
            Some(value) if value > 0.0 => Ok(()),
            _ => Err(FieldIssue::new(
                DraftField::BudgetAmount,
                "Enter a valid fixed amount",
            )),
        },
        BudgetKind::Hourly => match hourly_rate {
            Some(value) if value > 0.0 => Ok(()),
            _ => Err(FieldIssue::new(
                DraftField::HourlyRate,
                "Enter a valid hourly rate",
            )),
        },
    }
}

pub fn check_provider(selection: &ProviderSelection) -> Result<(), FieldIssue> {
    match (selection.kind, &selection.selected_provider) {
        (ProviderChoice::All, None) => Ok(()),
        (ProviderChoice::Selected, Some(_)) => Ok(()),
        (ProviderChoice::Selected, None) => Err(FieldIssue::new(
            DraftField::Provider,
            "Choose a provider or send the request to all providers",
        )),
        (ProviderChoice::All, Some(_)) => Err(FieldIssue::new(
            DraftField::Provider,
            "A provider can only be kept for a targeted request",
        )),
    }
}
