mod helpers;

use helpers::*;
use room_service::models::*;
use rust_decimal::Decimal;

fn query(address: &str, guests: u32, page: u32, page_size: u32) -> RoomsQuery {
    RoomsQuery {
        address: address.to_string(),
        guests,
        date_from: date(8, 1),
        date_to: date(8, 2),
        page,
        page_size,
    }
}

#[tokio::test]
async fn test_pagination_over_hits() {
    let t = TestContext::new();
    for i in 0..5 {
        t.bookable_room(&format!("Room {}", i), "Novi Sad", 100).await;
    }

    let result = t
        .state
        .search
        .find_available_rooms(&t.guest_ctx(), query("Novi Sad", 2, 3, 2))
        .await
        .unwrap();
    assert_eq!(result.hits.len(), 1);
    assert_eq!(result.page_info.total_pages, 3);
    assert_eq!(result.page_info.total_hits, 5);

    let result = t
        .state
        .search
        .find_available_rooms(&t.guest_ctx(), query("Novi Sad", 2, 40, 2))
        .await
        .unwrap();
    assert_eq!(result.hits.len(), 1, "page past the end shows the last page");
    assert_eq!(result.hits[0].name, "Room 4");
}

#[tokio::test]
async fn test_filters_by_address_and_capacity() {
    let t = TestContext::new();
    t.bookable_room("Center", "Zmaj Jovina 3, Novi Sad", 100).await;
    t.bookable_room("Belgrade", "Knez Mihailova 1, Beograd", 100).await;
    let small = t.create_room("Small", "Dunavska 2, Novi Sad", 1, 1).await;
    t.set_availability(&small, vec![avail_item(date(1, 1), date(12, 31), true)])
        .await;
    t.set_prices(&small, 10, false, vec![]).await;

    let result = t
        .state
        .search
        .find_available_rooms(&t.guest_ctx(), query("  novi SAD ", 2, 1, 10))
        .await
        .unwrap();
    let names: Vec<_> = result.hits.iter().map(|h| h.name.as_str()).collect();
    assert_eq!(names, vec!["Center"]);

    let result = t
        .state
        .search
        .find_available_rooms(&t.guest_ctx(), query("", 1, 1, 10))
        .await
        .unwrap();
    assert_eq!(result.page_info.total_hits, 3);
}

#[tokio::test]
async fn test_unavailable_and_deleted_rooms_excluded() {
    let t = TestContext::new();
    t.bookable_room("Open", "Novi Sad", 100).await;

    let closed = t.create_room("Closed", "Novi Sad", 1, 4).await;
    t.set_availability(&closed, vec![avail_item(date(8, 1), date(8, 1), true)])
        .await;
    t.set_prices(&closed, 100, false, vec![]).await;

    t.create_room("No rules", "Novi Sad", 1, 4).await;

    let result = t
        .state
        .search
        .find_available_rooms(&t.guest_ctx(), query("Novi Sad", 2, 1, 10))
        .await
        .unwrap();
    let names: Vec<_> = result.hits.iter().map(|h| h.name.as_str()).collect();
    assert_eq!(names, vec!["Open"]);

    t.state.rooms.delete_rooms_by_host(&t.host_ctx()).await.unwrap();
    let result = t
        .state
        .search
        .find_available_rooms(&t.guest_ctx(), query("Novi Sad", 2, 1, 10))
        .await
        .unwrap();
    assert!(result.hits.is_empty());
    assert_eq!(result.page_info.total_pages, 0);
}

#[tokio::test]
async fn test_hit_carries_prices() {
    let t = TestContext::new();
    let room = t.create_room("Family", "Novi Sad", 1, 4).await;
    t.set_availability(&room, vec![avail_item(date(1, 1), date(12, 31), true)])
        .await;
    t.set_prices(&room, 100, true, vec![price_item(date(8, 2), date(8, 2), 200)])
        .await;

    let result = t
        .state
        .search
        .find_available_rooms(&t.guest_ctx(), query("novi", 2, 1, 10))
        .await
        .unwrap();
    let hit = &result.hits[0];
    // (100 + 200) * 2 guests
    assert_eq!(hit.total_price, 600);
    assert!(hit.per_guest);
    // 600 over 2 nights over 2 guests
    assert_eq!(hit.unit_price, Decimal::from(150));
    assert_eq!(hit.photos, vec!["Family.jpg".to_string()]);
}

#[tokio::test]
async fn test_invalid_queries_rejected() {
    let t = TestContext::new();
    t.bookable_room("Open", "Novi Sad", 100).await;
    let search = &t.state.search;
    let ctx = t.guest_ctx();

    let err = search
        .find_available_rooms(&ctx, query("Novi Sad", 2, 1, 0))
        .await
        .unwrap_err();
    assert!(err.is_validation());

    let err = search
        .find_available_rooms(&ctx, query("Novi Sad", 2, 0, 10))
        .await
        .unwrap_err();
    assert!(err.is_validation());

    let reversed = RoomsQuery {
        date_from: date(8, 12),
        date_to: date(8, 10),
        ..query("Novi Sad", 2, 1, 10)
    };
    assert!(search.find_available_rooms(&ctx, reversed).await.unwrap_err().is_validation());

    // Year-agnostic ranges cannot wrap around New Year
    let wrapping = RoomsQuery {
        date_from: date_in(2024, 12, 30),
        date_to: date_in(2025, 1, 2),
        ..query("Novi Sad", 2, 1, 10)
    };
    assert!(search.find_available_rooms(&ctx, wrapping).await.unwrap_err().is_validation());
}

#[tokio::test]
async fn test_missing_price_list_fails_search() {
    let t = TestContext::new();
    let room = t.create_room("Unpriced", "Novi Sad", 1, 4).await;
    t.set_availability(&room, vec![avail_item(date(1, 1), date(12, 31), true)])
        .await;

    let err = t
        .state
        .search
        .find_available_rooms(&t.guest_ctx(), query("Novi Sad", 2, 1, 10))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}
