use serde::{Deserialize, Serialize};

/// Where the work happens, plus reference photos supplied by the picker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub city: String,
    pub street: String,
    pub building: String,
    pub images: Vec<String>,
}

impl Location {
    pub fn in_city(city: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimingKind {
    #[default]
    Flexible,
    Urgent,
}

/// When the work should happen. `day` and `time_slot` only carry meaning for
/// flexible timing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timing {
    #[serde(rename = "type")]
    pub kind: TimingKind,
    pub day: String,
    pub time_slot: String,
}

impl Timing {
    pub fn urgent() -> Self {
        Self {
            kind: TimingKind::Urgent,
            ..Self::default()
        }
    }

    pub fn flexible(day: impl Into<String>, time_slot: impl Into<String>) -> Self {
        Self {
            kind: TimingKind::Flexible,
            day: day.into(),
            time_slot: time_slot.into(),
        }
    }

    /// Urgent timing never keeps a day or slot.
    pub fn normalized(self) -> Self {
        match self.kind {
            TimingKind::Urgent => Self::urgent(),
            TimingKind::Flexible => self,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetKind {
    Fixed,
    Hourly,
    /// No pricing model chosen yet, or no budget at all.
    #[default]
    #[serde(rename = "none")]
    Unset,
}

/// Budget slice of a draft.
///
/// At most one of `amount` and `hourly_rate` is non-zero, and both are zero
/// when `has_budget` is false.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub has_budget: bool,
    #[serde(rename = "type")]
    pub kind: BudgetKind,
    pub amount: f64,
    pub hourly_rate: f64,
}

impl Budget {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn fixed(amount: f64) -> Self {
        Self {
            has_budget: true,
            kind: BudgetKind::Fixed,
            amount,
            hourly_rate: 0.0,
        }
    }

    pub fn hourly(rate: f64) -> Self {
        Self {
            has_budget: true,
            kind: BudgetKind::Hourly,
            amount: 0.0,
            hourly_rate: rate,
        }
    }

    /// Collapses the value onto the budget invariant.
    pub fn normalized(self) -> Self {
        if !self.has_budget {
            return Self::none();
        }
        let finite = |value: f64| if value.is_finite() { value } else { 0.0 };
        match self.kind {
            BudgetKind::Fixed => Self::fixed(finite(self.amount)),
            BudgetKind::Hourly => Self::hourly(finite(self.hourly_rate)),
            BudgetKind::Unset => Self {
                has_budget: true,
                kind: BudgetKind::Unset,
                amount: 0.0,
                hourly_rate: 0.0,
            },
        }
    }

    pub fn holds_invariant(&self) -> bool {
        if !self.has_budget {
            return self.kind == BudgetKind::Unset && self.amount == 0.0 && self.hourly_rate == 0.0;
        }
        match self.kind {
            BudgetKind::Fixed => self.hourly_rate == 0.0,
            BudgetKind::Hourly => self.amount == 0.0,
            BudgetKind::Unset => self.amount == 0.0 && self.hourly_rate == 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderRef {
    pub id: String,
    pub name: String,
}

impl ProviderRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderChoice {
    #[default]
    All,
    Selected,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderSelection {
    #[serde(rename = "type")]
    pub kind: ProviderChoice,
    pub selected_provider: Option<ProviderRef>,
}

impl ProviderSelection {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn selected(provider: ProviderRef) -> Self {
        Self {
            kind: ProviderChoice::Selected,
            selected_provider: Some(provider),
        }
    }

    /// A provider is only kept while the selection is `Selected`.
    pub fn normalized(self) -> Self {
        match self.kind {
            ProviderChoice::All => Self::all(),
            ProviderChoice::Selected => self,
        }
    }

    pub fn holds_invariant(&self) -> bool {
        self.selected_provider.is_none() || self.kind == ProviderChoice::Selected
    }
}

/// The not-yet-submitted service request accumulated across wizard steps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Draft {
    pub category: Option<String>,
    pub title: String,
    pub description: String,
    pub location: Location,
    pub timing: Timing,
    pub budget: Budget,
    pub provider_selection: ProviderSelection,
    pub group_id: Option<String>,
}

impl Draft {
    pub fn is_empty(&self) -> bool {
        *self == Draft::default()
    }
}
