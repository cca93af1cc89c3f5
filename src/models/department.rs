use serde::Serialize;

/// A department patients can book into. Static reference data, defined
/// at build time and never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Department {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

pub const DEPARTMENTS: &[Department] = &[
    Department {
        id: "general",
        name: "General Medicine",
        description: "Primary care and general health consultations",
    },
    Department {
        id: "cardiology",
        name: "Cardiology",
        description: "Heart and cardiovascular system care",
    },
    Department {
        id: "orthopedics",
        name: "Orthopedics",
        description: "Bone, joint, and muscle treatment",
    },
    Department {
        id: "pediatrics",
        name: "Pediatrics",
        description: "Healthcare for infants and children",
    },
    Department {
        id: "dermatology",
        name: "Dermatology",
        description: "Skin, hair, and nail conditions",
    },
    Department {
        id: "neurology",
        name: "Neurology",
        description: "Brain and nervous system disorders",
    },
];

/// Look up a department by id.
pub fn find_department(id: &str) -> Option<&'static Department> {
    DEPARTMENTS.iter().find(|d| d.id == id)
}
