//! Repository-level tests for the movement lifecycle.
//!
//! Exercises the guarded transition updates directly: a transition whose
//! status predicate no longer holds returns `None` instead of overwriting
//! newer state, and creation is atomic across the movement and its file
//! links.

use filetrail_core::movement::MovementStatus;
use filetrail_db::models::department::CreateDepartment;
use filetrail_db::models::file::CreateFile;
use filetrail_db::models::folder::CreateFolder;
use filetrail_db::models::location::CreateLocation;
use filetrail_db::models::movement::CreateMovement;
use filetrail_db::models::user::CreateUser;
use filetrail_db::repositories::{
    DepartmentRepo, FileRepo, FolderRepo, LocationRepo, MovementRepo, UserRepo,
};
use sqlx::PgPool;

/// Seed a department, location, user, folder, and two files.
/// Returns (user_id, file_ids).
async fn seed(pool: &PgPool) -> (i64, Vec<i64>) {
    let dept = DepartmentRepo::create(
        pool,
        &CreateDepartment {
            name: "Engineering".into(),
        },
    )
    .await
    .unwrap();
    let location = LocationRepo::create(
        pool,
        &CreateLocation {
            name: "Archive Room A".into(),
        },
    )
    .await
    .unwrap();
    let user = UserRepo::create(
        pool,
        &CreateUser {
            name: "Siti".into(),
            email: "siti@example.com".into(),
            password_hash: "unused".into(),
            userlevel: 3,
            department_id: Some(dept.id),
        },
    )
    .await
    .unwrap();
    let folder = FolderRepo::create(
        pool,
        &CreateFolder {
            name: "Contracts".into(),
            department_id: Some(dept.id),
            location_id: location.id,
            file_ids: Vec::new(),
        },
        dept.id,
        &dept.name,
        user.id,
    )
    .await
    .unwrap();

    let mut file_ids = Vec::new();
    for name in ["Contract A", "Contract B"] {
        let file = FileRepo::create(
            pool,
            &CreateFile {
                name: name.into(),
                folder_id: folder.id,
            },
            user.id,
        )
        .await
        .unwrap();
        file_ids.push(file.id);
    }

    (user.id, file_ids)
}

fn new_movement(user_id: i64, file_ids: Vec<i64>) -> CreateMovement {
    CreateMovement {
        move_type: "Take Out".into(),
        remark: None,
        requester_id: user_id,
        folder_id: None,
        file_ids,
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_starts_pending_with_files_linked(pool: PgPool) {
    let (user_id, file_ids) = seed(&pool).await;

    let movement = MovementRepo::create(&pool, &new_movement(user_id, file_ids.clone()))
        .await
        .unwrap();

    assert_eq!(movement.status_id, MovementStatus::Pending.id());
    assert!(movement.approved_at.is_none());
    assert!(movement.approver_id.is_none());

    let detail = MovementRepo::find_detail(&pool, movement.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(detail.files.len(), file_ids.len());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_rolls_back_on_bad_file_link(pool: PgPool) {
    let (user_id, mut file_ids) = seed(&pool).await;
    file_ids.push(999999); // violates the movement_files FK

    let result = MovementRepo::create(&pool, &new_movement(user_id, file_ids)).await;
    assert_matches::assert_matches!(
        result,
        Err(sqlx::Error::Database(_)),
        "FK violation must fail the insert"
    );

    // The movement row was rolled back with the file links.
    let movements = MovementRepo::list(&pool).await.unwrap();
    assert!(movements.is_empty(), "no partial creation may remain");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_guarded_approve_refuses_non_pending(pool: PgPool) {
    let (user_id, file_ids) = seed(&pool).await;
    let movement = MovementRepo::create(&pool, &new_movement(user_id, file_ids))
        .await
        .unwrap();

    let approved = MovementRepo::approve(&pool, movement.id, user_id)
        .await
        .unwrap();
    assert!(approved.is_some());

    // Second approval finds no pending row.
    let again = MovementRepo::approve(&pool, movement.id, user_id)
        .await
        .unwrap();
    assert!(again.is_none(), "guarded update must not re-approve");

    // Reject is equally refused once approved.
    let rejected = MovementRepo::reject(&pool, movement.id, user_id, "late")
        .await
        .unwrap();
    assert!(rejected.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_transition_timestamps_set_exactly_once(pool: PgPool) {
    let (user_id, file_ids) = seed(&pool).await;
    let movement = MovementRepo::create(&pool, &new_movement(user_id, file_ids))
        .await
        .unwrap();

    let approved = MovementRepo::approve(&pool, movement.id, user_id)
        .await
        .unwrap()
        .unwrap();
    let approved_at = approved.approved_at.expect("approved_at must be set");

    let taken = MovementRepo::mark_taken_out(&pool, movement.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(
        taken.approved_at,
        Some(approved_at),
        "approved_at must not change on later transitions"
    );
    assert!(taken.taken_out_at.is_some());
    assert!(taken.returned_at.is_none());

    let returned = MovementRepo::mark_returned(&pool, movement.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(returned.taken_out_at, taken.taken_out_at);
    assert!(returned.returned_at.is_some());
    assert_eq!(returned.status_id, MovementStatus::Returned.id());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_mark_returned_requires_taken_out(pool: PgPool) {
    let (user_id, file_ids) = seed(&pool).await;
    let movement = MovementRepo::create(&pool, &new_movement(user_id, file_ids))
        .await
        .unwrap();

    // Pending -> Returned is not a legal jump.
    let returned = MovementRepo::mark_returned(&pool, movement.id).await.unwrap();
    assert!(returned.is_none());

    MovementRepo::approve(&pool, movement.id, user_id).await.unwrap();

    // Approved -> Returned is not legal either.
    let returned = MovementRepo::mark_returned(&pool, movement.id).await.unwrap();
    assert!(returned.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_open_movement_check_clears_after_return(pool: PgPool) {
    let (user_id, file_ids) = seed(&pool).await;
    let movement = MovementRepo::create(&pool, &new_movement(user_id, file_ids.clone()))
        .await
        .unwrap();

    assert!(
        MovementRepo::has_open_movement_for_files(&pool, user_id, &file_ids)
            .await
            .unwrap()
    );

    MovementRepo::approve(&pool, movement.id, user_id).await.unwrap();
    MovementRepo::mark_taken_out(&pool, movement.id).await.unwrap();
    assert!(
        MovementRepo::has_open_movement_for_files(&pool, user_id, &file_ids)
            .await
            .unwrap(),
        "taken-out requests still count as open"
    );

    MovementRepo::mark_returned(&pool, movement.id).await.unwrap();
    assert!(
        !MovementRepo::has_open_movement_for_files(&pool, user_id, &file_ids)
            .await
            .unwrap(),
        "returned requests no longer block new ones"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_file_departments_skips_unfiled_files(pool: PgPool) {
    let (_user_id, file_ids) = seed(&pool).await;

    // Detach one file from its folder; it can no longer be resolved.
    FolderRepo::detach_file(&pool, file_ids[0]).await.unwrap();

    let rows = MovementRepo::file_departments(&pool, &file_ids).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].file_id, file_ids[1]);
}
