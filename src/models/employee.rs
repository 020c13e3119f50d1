//! Staff roster shown on the home page.

use serde::{Deserialize, Serialize};

/// A staff member listed on the home page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub name: String,
    pub position: String,
}

impl Employee {
    pub fn new(name: impl Into<String>, position: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            position: position.into(),
        }
    }

    /// The roster the application ships with.
    pub fn default_roster() -> Vec<Employee> {
        vec![
            Employee::new("Jansen Manuel", "Front-end Developer"),
            Employee::new("Jevist Etlfian", "Front-end Developer"),
            Employee::new("Muhammad Ihsan Aryandi", "Back-end Developer"),
            Employee::new("Kristianto", "Back-end Developer"),
            Employee::new("Bama Qyandija Deandra", "Mobile Developer"),
            Employee::new("Martinus Tri Nur Cahyono", "Lead Developer"),
        ]
    }
}
