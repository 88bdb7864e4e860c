use personas_sdk::{NewPersona, Persona};
use sea_orm::ActiveValue::{NotSet, Set};

use crate::domain::error::DomainError;
use crate::infra::storage::entity::{ActiveModel, Model as PersonaEntity};

/// Convert a database row to a contract model.
///
/// `genero` and `ciudad` are stored as text; a value outside the closed
/// enumerations means the row was written by something else and is
/// reported as a database error.
impl TryFrom<PersonaEntity> for Persona {
    type Error = DomainError;

    fn try_from(e: PersonaEntity) -> Result<Self, Self::Error> {
        let genero = e
            .genero
            .parse()
            .map_err(|err| DomainError::database(format!("row {}: {err}", e.id)))?;
        let ciudad = e
            .ciudad
            .parse()
            .map_err(|err| DomainError::database(format!("row {}: {err}", e.id)))?;

        Ok(Self {
            id: e.id,
            dni: e.dni,
            nombres: e.nombres,
            apellidos: e.apellidos,
            fecha_nacimiento: e.fecha_nacimiento,
            genero,
            ciudad,
        })
    }
}

/// Active model with every business column set and the id left to the store.
impl From<&NewPersona> for ActiveModel {
    fn from(p: &NewPersona) -> Self {
        Self {
            id: NotSet,
            dni: Set(p.dni.clone()),
            nombres: Set(p.nombres.clone()),
            apellidos: Set(p.apellidos.clone()),
            fecha_nacimiento: Set(p.fecha_nacimiento),
            genero: Set(p.genero.as_str().to_owned()),
            ciudad: Set(p.ciudad.as_str().to_owned()),
        }
    }
}
