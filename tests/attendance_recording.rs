mod common;

use campus_attendance::{
    error::AppError,
    models::attendance::RecordOutcome,
    services::attendance_service,
};
use common::{count_attendance, insert_attendance, insert_student, manila_at, pool};

#[tokio::test]
async fn second_scan_same_day_returns_first_record() {
    let pool = pool().await;
    insert_student(&pool, "0001").await;

    let first = attendance_service::record_attendance(&pool, "0001", manila_at(2025, 6, 2, 7, 45))
        .await
        .unwrap();
    assert_eq!(first.outcome, RecordOutcome::Recorded);
    assert_eq!(first.record.date, "2025-06-02");
    assert_eq!(first.record.time_in, "07:45 AM");
    assert_eq!(first.student.firstname, "Dennis");

    let second = attendance_service::record_attendance(&pool, "0001", manila_at(2025, 6, 2, 15, 10))
        .await
        .unwrap();
    assert_eq!(second.outcome, RecordOutcome::AlreadyRecorded);
    assert_eq!(second.record, first.record);
    assert_eq!(count_attendance(&pool, "0001").await, 1);
}

#[tokio::test]
async fn a_new_day_gets_a_new_record() {
    let pool = pool().await;
    insert_student(&pool, "0001").await;

    attendance_service::record_attendance(&pool, "0001", manila_at(2025, 6, 2, 23, 59))
        .await
        .unwrap();
    let next = attendance_service::record_attendance(&pool, "0001", manila_at(2025, 6, 3, 0, 5))
        .await
        .unwrap();
    assert_eq!(next.outcome, RecordOutcome::Recorded);
    assert_eq!(next.record.time_in, "12:05 AM");
    assert_eq!(count_attendance(&pool, "0001").await, 2);
}

#[tokio::test]
async fn unknown_student_is_not_found() {
    let pool = pool().await;
    let err = attendance_service::record_attendance(&pool, "0999", manila_at(2025, 6, 2, 9, 0))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    assert_eq!(count_attendance(&pool, "0999").await, 0);
}

#[tokio::test]
async fn by_date_orders_across_noon() {
    let pool = pool().await;
    for id in ["0001", "0002", "0003"] {
        insert_student(&pool, id).await;
    }
    insert_attendance(&pool, "0001", "2025-06-02", "01:30 PM").await;
    insert_attendance(&pool, "0002", "2025-06-02", "12:15 PM").await;
    insert_attendance(&pool, "0003", "2025-06-02", "09:00 AM").await;
    insert_attendance(&pool, "0001", "2025-06-01", "08:00 AM").await;

    let entries = attendance_service::find_attendance_by_date(&pool, "2025-06-02").await.unwrap();
    let order: Vec<&str> = entries.iter().map(|e| e.student_id.as_str()).collect();
    assert_eq!(order, vec!["0003", "0002", "0001"]);
    assert_eq!(entries[0].last, "Durano");
}

#[tokio::test]
async fn full_listing_is_newest_first() {
    let pool = pool().await;
    insert_student(&pool, "0001").await;
    insert_student(&pool, "0002").await;
    insert_attendance(&pool, "0001", "2025-06-01", "08:00 AM").await;
    insert_attendance(&pool, "0001", "2025-06-02", "11:00 AM").await;
    insert_attendance(&pool, "0002", "2025-06-02", "01:00 PM").await;

    let entries = attendance_service::find_all_attendance(&pool).await.unwrap();
    let order: Vec<(&str, &str)> = entries
        .iter()
        .map(|e| (e.date.as_str(), e.time_in.as_str()))
        .collect();
    assert_eq!(
        order,
        vec![
            ("2025-06-02", "01:00 PM"),
            ("2025-06-02", "11:00 AM"),
            ("2025-06-01", "08:00 AM"),
        ]
    );
}

#[tokio::test]
async fn purge_removes_only_future_rows() {
    let pool = pool().await;
    insert_student(&pool, "0001").await;
    insert_attendance(&pool, "0001", "2025-06-03", "08:00 AM").await;
    insert_attendance(&pool, "0001", "2025-06-01", "08:00 AM").await;

    let deleted = attendance_service::delete_future_attendance(&pool, "2025-06-02").await.unwrap();
    assert_eq!(deleted, 1);

    let remaining = attendance_service::find_all_attendance(&pool).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].date, "2025-06-01");
}

#[tokio::test]
async fn delete_reports_whether_a_row_went_away() {
    let pool = pool().await;
    insert_student(&pool, "0001").await;
    let scan = attendance_service::record_attendance(&pool, "0001", manila_at(2025, 6, 2, 8, 0))
        .await
        .unwrap();

    assert!(attendance_service::delete_attendance(&pool, scan.record.id).await.unwrap());
    assert!(!attendance_service::delete_attendance(&pool, scan.record.id).await.unwrap());
}
