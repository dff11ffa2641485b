use chrono::{Duration, Utc};

use fleetpulse_api::error::ApiError;
use fleetpulse_api::usecase::vehicle::{
    CreateVehicleUseCase, DeleteVehicleUseCase, GetVehicleUseCase, ListVehiclesUseCase,
    UpdateVehicleUseCase,
};
use fleetpulse_domain::id::{UserId, VehicleId};
use fleetpulse_testing::fixture::{vehicle, vehicle_details};
use uuid::Uuid;

use crate::helpers::MockVehicleRepo;

fn user() -> UserId {
    UserId(Uuid::now_v7())
}

// ── ListVehiclesUseCase ──────────────────────────────────────────────────────

#[tokio::test]
async fn should_list_only_own_vehicles_oldest_first() {
    let owner = user();
    let mut newer = vehicle(owner, "MH12AA0002");
    let mut older = vehicle(owner, "MH12AA0001");
    older.created_at = Utc::now() - Duration::days(3);
    newer.created_at = Utc::now() - Duration::days(1);
    let foreign = vehicle(user(), "KA01ZZ9999");

    let usecase = ListVehiclesUseCase {
        vehicles: MockVehicleRepo::new(vec![newer.clone(), foreign, older.clone()]),
    };
    let listed = usecase.execute(owner).await.unwrap();

    let ids: Vec<VehicleId> = listed.iter().map(|v| v.id).collect();
    assert_eq!(ids, vec![older.id, newer.id]);
}

// ── CreateVehicleUseCase ─────────────────────────────────────────────────────

#[tokio::test]
async fn should_create_trimmed_vehicle_for_caller() {
    let owner = user();
    let repo = MockVehicleRepo::empty();
    let usecase = CreateVehicleUseCase {
        vehicles: repo.clone(),
    };

    let mut details = vehicle_details(" MH12AB1234 ");
    details.name = "  Nexon ".into();
    let created = usecase.execute(owner, details).await.unwrap();

    assert_eq!(created.owner, owner);
    assert_eq!(created.details.name, "Nexon");
    assert_eq!(created.details.registration_no, "MH12AB1234");
    assert_eq!(repo.get(created.id), Some(created));
}

#[tokio::test]
async fn should_reject_duplicate_registration_on_create() {
    let repo = MockVehicleRepo::new(vec![vehicle(user(), "MH12AB1234")]);
    let usecase = CreateVehicleUseCase {
        vehicles: repo.clone(),
    };

    let result = usecase
        .execute(user(), vehicle_details("MH12AB1234"))
        .await;
    assert!(
        matches!(result, Err(ApiError::RegistrationTaken)),
        "expected RegistrationTaken, got {result:?}"
    );
    assert_eq!(repo.len(), 1);
}

#[tokio::test]
async fn should_reject_missing_required_field() {
    let usecase = CreateVehicleUseCase {
        vehicles: MockVehicleRepo::empty(),
    };
    let mut details = vehicle_details("MH12AB1234");
    details.location = " ".into();

    let result = usecase.execute(user(), details).await;
    match result {
        Err(ApiError::InvalidInput(message)) => assert_eq!(message, "please provide the location"),
        other => panic!("expected InvalidInput, got {other:?}"),
    }
}

// ── GetVehicleUseCase ────────────────────────────────────────────────────────

#[tokio::test]
async fn should_get_own_vehicle() {
    let owner = user();
    let stored = vehicle(owner, "MH12AB1234");
    let usecase = GetVehicleUseCase {
        vehicles: MockVehicleRepo::new(vec![stored.clone()]),
    };

    assert_eq!(usecase.execute(owner, stored.id).await.unwrap(), stored);
}

#[tokio::test]
async fn should_forbid_access_to_foreign_vehicle() {
    let stored = vehicle(user(), "MH12AB1234");
    let usecase = GetVehicleUseCase {
        vehicles: MockVehicleRepo::new(vec![stored.clone()]),
    };

    let result = usecase.execute(user(), stored.id).await;
    assert!(matches!(result, Err(ApiError::NotVehicleOwner)));
}

#[tokio::test]
async fn should_return_not_found_for_unknown_vehicle() {
    let usecase = GetVehicleUseCase {
        vehicles: MockVehicleRepo::empty(),
    };
    let result = usecase.execute(user(), VehicleId(Uuid::now_v7())).await;
    assert!(matches!(result, Err(ApiError::VehicleNotFound)));
}

// ── UpdateVehicleUseCase ─────────────────────────────────────────────────────

#[tokio::test]
async fn should_replace_details_and_keep_own_registration() {
    let owner = user();
    let stored = vehicle(owner, "MH12AB1234");
    let repo = MockVehicleRepo::new(vec![stored.clone()]);
    let usecase = UpdateVehicleUseCase {
        vehicles: repo.clone(),
    };

    let mut details = vehicle_details("MH12AB1234");
    details.location = "Mumbai".into();
    details.is_favorited = true;
    let updated = usecase.execute(owner, stored.id, details).await.unwrap();

    assert_eq!(updated.details.location, "Mumbai");
    assert!(updated.details.is_favorited);
    assert!(updated.updated_at >= stored.updated_at);
    assert_eq!(repo.get(stored.id).unwrap().details.location, "Mumbai");
}

#[tokio::test]
async fn should_reject_registration_of_another_vehicle_and_leave_record_unchanged() {
    let owner = user();
    let first = vehicle(owner, "MH12AA0001");
    let second = vehicle(owner, "MH12AA0002");
    let repo = MockVehicleRepo::new(vec![first.clone(), second]);
    let usecase = UpdateVehicleUseCase {
        vehicles: repo.clone(),
    };

    let mut details = vehicle_details("MH12AA0002");
    details.location = "Nashik".into();
    let result = usecase.execute(owner, first.id, details).await;

    assert!(matches!(result, Err(ApiError::RegistrationTaken)));
    assert_eq!(repo.get(first.id), Some(first));
}

#[tokio::test]
async fn should_forbid_update_of_foreign_vehicle() {
    let stored = vehicle(user(), "MH12AB1234");
    let repo = MockVehicleRepo::new(vec![stored.clone()]);
    let usecase = UpdateVehicleUseCase {
        vehicles: repo.clone(),
    };

    let result = usecase
        .execute(user(), stored.id, vehicle_details("MH12ZZ0000"))
        .await;
    assert!(matches!(result, Err(ApiError::NotVehicleOwner)));
    assert_eq!(repo.get(stored.id), Some(stored));
}

#[tokio::test]
async fn should_reject_out_of_range_year_on_update() {
    let owner = user();
    let stored = vehicle(owner, "MH12AB1234");
    let usecase = UpdateVehicleUseCase {
        vehicles: MockVehicleRepo::new(vec![stored.clone()]),
    };

    let mut details = vehicle_details("MH12AB1234");
    details.year = 1700;
    let result = usecase.execute(owner, stored.id, details).await;
    assert!(matches!(result, Err(ApiError::InvalidInput(_))));
}

// ── DeleteVehicleUseCase ─────────────────────────────────────────────────────

#[tokio::test]
async fn should_delete_own_vehicle() {
    let owner = user();
    let stored = vehicle(owner, "MH12AB1234");
    let repo = MockVehicleRepo::new(vec![stored.clone()]);
    let usecase = DeleteVehicleUseCase {
        vehicles: repo.clone(),
    };

    usecase.execute(owner, stored.id).await.unwrap();
    assert_eq!(repo.len(), 0);

    let again = usecase.execute(owner, stored.id).await;
    assert!(matches!(again, Err(ApiError::VehicleNotFound)));
}

#[tokio::test]
async fn should_forbid_delete_of_foreign_vehicle() {
    let stored = vehicle(user(), "MH12AB1234");
    let repo = MockVehicleRepo::new(vec![stored.clone()]);
    let usecase = DeleteVehicleUseCase {
        vehicles: repo.clone(),
    };

    let result = usecase.execute(user(), stored.id).await;
    assert!(matches!(result, Err(ApiError::NotVehicleOwner)));
    assert_eq!(repo.len(), 1);
}
