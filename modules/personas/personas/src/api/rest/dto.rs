use personas_sdk::{Persona, PersonaDraft};
use serde::{Deserialize, Serialize};
use time::Date;

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

pub const MSG_CREATED: &str = "Persona creada exitosamente";
pub const MSG_UPDATED: &str = "Persona actualizada exitosamente";
pub const MSG_DELETED: &str = "Persona eliminada exitosamente";

/// REST DTO for persona representation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonaDto {
    pub id: i64,
    pub dni: String,
    pub nombres: String,
    pub apellidos: String,
    #[serde(with = "iso_date")]
    pub fecha_nacimiento: Date,
    pub genero: String,
    pub ciudad: String,
}

/// REST DTO for create and full update.
///
/// Every field is optional at the wire level so that missing fields reach
/// validation and are reported together.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersonaReq {
    #[serde(default)]
    pub dni: Option<String>,
    #[serde(default)]
    pub nombres: Option<String>,
    #[serde(default)]
    pub apellidos: Option<String>,
    #[serde(default)]
    pub fecha_nacimiento: Option<String>,
    #[serde(default)]
    pub genero: Option<String>,
    #[serde(default)]
    pub ciudad: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedResp {
    pub id: i64,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResp {
    pub message: String,
}

impl MessageResp {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<Persona> for PersonaDto {
    fn from(p: Persona) -> Self {
        Self {
            id: p.id,
            dni: p.dni,
            nombres: p.nombres,
            apellidos: p.apellidos,
            fecha_nacimiento: p.fecha_nacimiento,
            genero: p.genero.as_str().to_owned(),
            ciudad: p.ciudad.as_str().to_owned(),
        }
    }
}

impl From<PersonaReq> for PersonaDraft {
    fn from(req: PersonaReq) -> Self {
        Self {
            dni: req.dni,
            nombres: req.nombres,
            apellidos: req.apellidos,
            fecha_nacimiento: req.fecha_nacimiento,
            genero: req.genero,
            ciudad: req.ciudad,
        }
    }
}
