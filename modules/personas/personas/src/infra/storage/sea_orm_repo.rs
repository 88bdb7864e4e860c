use async_trait::async_trait;
use personas_sdk::{NewPersona, Persona};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::domain::error::DomainError;
use crate::domain::repo::PersonasRepository;

use super::db::{db_err, write_err};
use super::entity::{ActiveModel, Column, Entity as PersonaEntity};

/// ORM-based implementation of the `PersonasRepository` trait.
///
/// Every call is a single statement; the `UNIQUE` index on `dni` is the
/// only uniqueness check.
#[derive(Clone)]
pub struct SeaOrmPersonasRepository {
    db: DatabaseConnection,
}

impl SeaOrmPersonasRepository {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PersonasRepository for SeaOrmPersonasRepository {
    async fn create(&self, persona: &NewPersona) -> Result<i64, DomainError> {
        let res = PersonaEntity::insert(ActiveModel::from(persona))
            .exec(&self.db)
            .await
            .map_err(|e| write_err(&e, &persona.dni))?;
        Ok(res.last_insert_id)
    }

    async fn list(&self) -> Result<Vec<Persona>, DomainError> {
        PersonaEntity::find()
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?
            .into_iter()
            .map(Persona::try_from)
            .collect()
    }

    async fn get(&self, id: i64) -> Result<Option<Persona>, DomainError> {
        PersonaEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .map(Persona::try_from)
            .transpose()
    }

    async fn update(&self, id: i64, persona: &NewPersona) -> Result<(), DomainError> {
        let res = PersonaEntity::update_many()
            .set(ActiveModel::from(persona))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| write_err(&e, &persona.dni))?;

        if res.rows_affected == 0 {
            return Err(DomainError::not_found(id));
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), DomainError> {
        let res = PersonaEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if res.rows_affected == 0 {
            return Err(DomainError::not_found(id));
        }
        Ok(())
    }

    async fn count(&self) -> Result<u64, DomainError> {
        PersonaEntity::find().count(&self.db).await.map_err(db_err)
    }
}
