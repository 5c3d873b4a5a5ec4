//! Domain entity representing a mechanic.

/// A mechanic employed by the shop.
#[derive(Debug, Clone, PartialEq)]
pub struct Mechanic {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub specialization: String,
    pub experience: i32,
}

impl Mechanic {
    pub fn new(
        id: i64,
        name: String,
        email: String,
        specialization: String,
        experience: i32,
    ) -> Self {
        Self {
            id,
            name,
            email,
            specialization,
            experience,
        }
    }
}

/// A mechanic together with the number of distinct tickets worked.
#[derive(Debug, Clone)]
pub struct RankedMechanic {
    pub mechanic: Mechanic,
    pub ticket_count: i64,
}

/// Input data for creating a mechanic.
#[derive(Debug, Clone)]
pub struct NewMechanic {
    pub name: String,
    pub email: String,
    pub specialization: String,
    pub experience: i32,
}

/// Partial update of a mechanic. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct MechanicPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub specialization: Option<String>,
    pub experience: Option<i32>,
}
