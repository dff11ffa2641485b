use anyhow::Context as _;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, SqlErr, sea_query::Expr,
};

use fleetpulse_api_schema::{users, vehicles};
use fleetpulse_domain::id::{UserId, VehicleId};
use fleetpulse_domain::vehicle::{Vehicle, VehicleDetails};

use crate::domain::repository::{UserRepository, VehicleRepository};
use crate::domain::types::User;
use crate::error::ApiError;

/// Name of the violated unique constraint, if `err` is one.
fn unique_violation(err: &DbErr) -> Option<String> {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => Some(detail),
        _ => None,
    }
}

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.db)
            .await
            .context("find user by username")?;
        Ok(model.map(user_from_model))
    }

    async fn create(&self, user: &User) -> Result<(), ApiError> {
        let result = users::ActiveModel {
            id: Set(user.id.0),
            email: Set(user.email.clone()),
            username: Set(user.username.clone()),
            password_hash: Set(user.password_hash.clone()),
            phone_number: Set(user.phone_number.clone()),
            refresh_token_hash: Set(user.refresh_token_hash.clone()),
            created_at: Set(user.created_at),
            updated_at: Set(user.updated_at),
        }
        .insert(&self.db)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) => match unique_violation(&e) {
                Some(detail) if detail.contains("username") => Err(ApiError::UsernameTaken),
                Some(_) => Err(ApiError::EmailTaken),
                None => Err(anyhow::Error::new(e).context("create user").into()),
            },
        }
    }

    async fn update_profile(&self, user: &User) -> Result<(), ApiError> {
        let result = users::ActiveModel {
            id: Set(user.id.0),
            username: Set(user.username.clone()),
            phone_number: Set(user.phone_number.clone()),
            password_hash: Set(user.password_hash.clone()),
            updated_at: Set(user.updated_at),
            ..Default::default()
        }
        .update(&self.db)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) if unique_violation(&e).is_some() => Err(ApiError::UsernameTaken),
            Err(DbErr::RecordNotUpdated) => Err(ApiError::UserNotFound),
            Err(e) => Err(anyhow::Error::new(e).context("update user profile").into()),
        }
    }

    async fn set_refresh_token_hash(
        &self,
        id: UserId,
        hash: Option<String>,
    ) -> Result<(), ApiError> {
        users::Entity::update_many()
            .col_expr(users::Column::RefreshTokenHash, Expr::value(hash))
            .filter(users::Column::Id.eq(id.0))
            .exec(&self.db)
            .await
            .context("set refresh token hash")?;
        Ok(())
    }
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: UserId(model.id),
        email: model.email,
        username: model.username,
        password_hash: model.password_hash,
        phone_number: model.phone_number,
        refresh_token_hash: model.refresh_token_hash,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Vehicle repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbVehicleRepository {
    pub db: DatabaseConnection,
}

impl VehicleRepository for DbVehicleRepository {
    async fn list_by_owner(&self, owner: UserId) -> Result<Vec<Vehicle>, ApiError> {
        let models = vehicles::Entity::find()
            .filter(vehicles::Column::UserId.eq(owner.0))
            .order_by_asc(vehicles::Column::CreatedAt)
            .order_by_asc(vehicles::Column::Id)
            .all(&self.db)
            .await
            .context("list vehicles by owner")?;
        Ok(models.into_iter().map(vehicle_from_model).collect())
    }

    async fn find_by_id(&self, id: VehicleId) -> Result<Option<Vehicle>, ApiError> {
        let model = vehicles::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find vehicle by id")?;
        Ok(model.map(vehicle_from_model))
    }

    async fn find_by_registration(
        &self,
        registration_no: &str,
    ) -> Result<Option<Vehicle>, ApiError> {
        let model = vehicles::Entity::find()
            .filter(vehicles::Column::RegistrationNo.eq(registration_no))
            .one(&self.db)
            .await
            .context("find vehicle by registration")?;
        Ok(model.map(vehicle_from_model))
    }

    async fn create(&self, vehicle: &Vehicle) -> Result<(), ApiError> {
        let mut model = details_active_model(&vehicle.details);
        model.id = Set(vehicle.id.0);
        model.user_id = Set(vehicle.owner.0);
        model.created_at = Set(vehicle.created_at);
        model.updated_at = Set(vehicle.updated_at);

        match model.insert(&self.db).await {
            Ok(_) => Ok(()),
            Err(e) if unique_violation(&e).is_some() => Err(ApiError::RegistrationTaken),
            Err(e) => Err(anyhow::Error::new(e).context("create vehicle").into()),
        }
    }

    async fn update(&self, vehicle: &Vehicle) -> Result<(), ApiError> {
        let mut model = details_active_model(&vehicle.details);
        model.id = Set(vehicle.id.0);
        model.updated_at = Set(vehicle.updated_at);

        match model.update(&self.db).await {
            Ok(_) => Ok(()),
            Err(e) if unique_violation(&e).is_some() => Err(ApiError::RegistrationTaken),
            Err(DbErr::RecordNotUpdated) => Err(ApiError::VehicleNotFound),
            Err(e) => Err(anyhow::Error::new(e).context("update vehicle").into()),
        }
    }

    async fn delete(&self, id: VehicleId) -> Result<bool, ApiError> {
        let result = vehicles::Entity::delete_by_id(id.0)
            .exec(&self.db)
            .await
            .context("delete vehicle")?;
        Ok(result.rows_affected > 0)
    }
}

fn details_active_model(details: &VehicleDetails) -> vehicles::ActiveModel {
    vehicles::ActiveModel {
        name: Set(details.name.clone()),
        year: Set(details.year),
        location: Set(details.location.clone()),
        image_url: Set(details.image_url.clone()),
        is_favorited: Set(details.is_favorited),
        fuel_type: Set(details.fuel_type.clone()),
        registered_name: Set(details.registered_name.clone()),
        transmission_type: Set(details.transmission_type.clone()),
        registration_no: Set(details.registration_no.clone()),
        ..Default::default()
    }
}

fn vehicle_from_model(model: vehicles::Model) -> Vehicle {
    Vehicle {
        id: VehicleId(model.id),
        owner: UserId(model.user_id),
        details: VehicleDetails {
            name: model.name,
            year: model.year,
            location: model.location,
            image_url: model.image_url,
            is_favorited: model.is_favorited,
            fuel_type: model.fuel_type,
            registered_name: model.registered_name,
            transmission_type: model.transmission_type,
            registration_no: model.registration_no,
        },
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}
