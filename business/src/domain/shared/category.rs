use serde::{Deserialize, Serialize};

/// Fixed set of expense categories, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    Food,
    Transport,
    Office,
    Software,
    Services,
    Other,
}

impl ExpenseCategory {
    pub const ALL: [ExpenseCategory; 6] = [
        ExpenseCategory::Food,
        ExpenseCategory::Transport,
        ExpenseCategory::Office,
        ExpenseCategory::Software,
        ExpenseCategory::Services,
        ExpenseCategory::Other,
    ];

    /// Human-facing label, as offered to the model and shown in forms.
    pub fn label(&self) -> &'static str {
        match self {
            ExpenseCategory::Food => "Food",
            ExpenseCategory::Transport => "Transport",
            ExpenseCategory::Office => "Office",
            ExpenseCategory::Software => "Software",
            ExpenseCategory::Services => "Services",
            ExpenseCategory::Other => "Other",
        }
    }

    /// Lenient lookup by English or Spanish label, ignoring case and
    /// surrounding whitespace.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "food" | "comida" => Some(ExpenseCategory::Food),
            "transport" | "transporte" => Some(ExpenseCategory::Transport),
            "office" | "oficina" => Some(ExpenseCategory::Office),
            "software" => Some(ExpenseCategory::Software),
            "services" | "servicios" => Some(ExpenseCategory::Services),
            "other" | "otros" | "otro" => Some(ExpenseCategory::Other),
            _ => None,
        }
    }
}

impl std::fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExpenseCategory::Food => write!(f, "food"),
            ExpenseCategory::Transport => write!(f, "transport"),
            ExpenseCategory::Office => write!(f, "office"),
            ExpenseCategory::Software => write!(f, "software"),
            ExpenseCategory::Services => write!(f, "services"),
            ExpenseCategory::Other => write!(f, "other"),
        }
    }
}

impl std::str::FromStr for ExpenseCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "food" => Ok(ExpenseCategory::Food),
            "transport" => Ok(ExpenseCategory::Transport),
            "office" => Ok(ExpenseCategory::Office),
            "software" => Ok(ExpenseCategory::Software),
            "services" => Ok(ExpenseCategory::Services),
            "other" => Ok(ExpenseCategory::Other),
            _ => Err(format!("Invalid expense category: {}", s)),
        }
    }
}
