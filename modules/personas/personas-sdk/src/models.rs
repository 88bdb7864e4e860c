//! Contract models for the `personas` module.
//!
//! These types are transport-agnostic: no serde, no database annotations.
//! The REST layer and the storage layer convert to and from them.

use std::fmt;
use std::str::FromStr;

use time::Date;

/// A stored persona record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Persona {
    pub id: i64,
    pub dni: String,
    pub nombres: String,
    pub apellidos: String,
    pub fecha_nacimiento: Date,
    pub genero: Gender,
    pub ciudad: City,
}

/// A fully validated field set, ready to be written by the store.
///
/// Used for both create and full-replace update; `id` is never part of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPersona {
    pub dni: String,
    pub nombres: String,
    pub apellidos: String,
    pub fecha_nacimiento: Date,
    pub genero: Gender,
    pub ciudad: City,
}

impl NewPersona {
    /// Attach a store-assigned id.
    #[must_use]
    pub fn with_id(self, id: i64) -> Persona {
        Persona {
            id,
            dni: self.dni,
            nombres: self.nombres,
            apellidos: self.apellidos,
            fecha_nacimiento: self.fecha_nacimiento,
            genero: self.genero,
            ciudad: self.ciudad,
        }
    }
}

/// Raw, unvalidated field set as submitted by a caller.
///
/// Every field is optional so that missing fields can be reported
/// together instead of failing on the first one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonaDraft {
    pub dni: Option<String>,
    pub nombres: Option<String>,
    pub apellidos: Option<String>,
    pub fecha_nacimiento: Option<String>,
    pub genero: Option<String>,
    pub ciudad: Option<String>,
}

impl From<&Persona> for PersonaDraft {
    fn from(p: &Persona) -> Self {
        Self {
            dni: Some(p.dni.clone()),
            nombres: Some(p.nombres.clone()),
            apellidos: Some(p.apellidos.clone()),
            fecha_nacimiento: Some(p.fecha_nacimiento.to_string()),
            genero: Some(p.genero.as_str().to_owned()),
            ciudad: Some(p.ciudad.as_str().to_owned()),
        }
    }
}

/// Returned when a string is not a member of one of the closed enumerations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{value}' is not a valid {kind}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    Masculino,
    Femenino,
}

impl Gender {
    pub const ALL: [Self; 2] = [Self::Masculino, Self::Femenino];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Masculino => "Masculino",
            Self::Femenino => "Femenino",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| UnknownVariant {
                kind: "genero",
                value: s.to_owned(),
            })
    }
}

/// Cities a persona may be registered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum City {
    Quito,
    Guayaquil,
    Cuenca,
    Ambato,
    Manta,
}

impl City {
    pub const ALL: [Self; 5] = [
        Self::Quito,
        Self::Guayaquil,
        Self::Cuenca,
        Self::Ambato,
        Self::Manta,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Quito => "Quito",
            Self::Guayaquil => "Guayaquil",
            Self::Cuenca => "Cuenca",
            Self::Ambato => "Ambato",
            Self::Manta => "Manta",
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for City {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownVariant {
                kind: "ciudad",
                value: s.to_owned(),
            })
    }
}
