use billsync_core::bills::{Bill, BillBook, BillType, Category, IdSource, RecurrenceRule};
use chrono::NaiveDate;
use uuid::Uuid;

struct SequentialIds(u128);

impl IdSource for SequentialIds {
    fn next_id(&mut self) -> Uuid {
        self.0 += 1;
        Uuid::from_u128(self.0)
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Seed plus three generated monthly instances (four bills total).
fn book_with_series() -> (BillBook, Uuid) {
    let mut book = BillBook::new();
    let seed = Bill::new(
        "Mensalidade",
        350.0,
        date(2024, 1, 10),
        Category::Education,
        BillType::Payable,
    )
    .with_recurrence(RecurrenceRule::Monthly, Some(date(2024, 4, 10)));
    let root = book.add_series(seed, &mut SequentialIds(0));
    (book, root)
}

#[test]
fn add_series_appends_root_and_members_unpaid() {
    let (book, root) = book_with_series();
    assert_eq!(book.len(), 4);
    assert!(book.bills.iter().all(|bill| !bill.is_paid));
    assert!(book.get(root).unwrap().parent_id.is_none());
    assert_eq!(
        book.bills
            .iter()
            .filter(|bill| bill.parent_id == Some(root))
            .count(),
        3
    );
}

#[test]
fn add_series_forces_the_seed_unpaid() {
    let mut book = BillBook::new();
    let mut seed = Bill::new(
        "Salário",
        5000.0,
        date(2024, 2, 1),
        Category::Income,
        BillType::Receivable,
    );
    seed.is_paid = true;
    let root = book.add_series(seed, &mut SequentialIds(0));
    assert!(!book.get(root).unwrap().is_paid);
}

#[test]
fn deleting_the_series_from_a_non_root_member_removes_everything() {
    let (mut book, root) = book_with_series();
    let member = book
        .bills
        .iter()
        .find(|bill| bill.parent_id == Some(root))
        .map(|bill| bill.id)
        .expect("generated member");

    let removed = book.delete_series(member).expect("delete series");
    assert_eq!(removed, 4);
    assert!(book.is_empty());
}

#[test]
fn deleting_the_series_from_the_root_removes_everything() {
    let (mut book, root) = book_with_series();
    let removed = book.delete_series(root).expect("delete series");
    assert_eq!(removed, 4);
    assert!(book.is_empty());
}

#[test]
fn series_delete_leaves_unrelated_bills_alone() {
    let (mut book, root) = book_with_series();
    let lone = Bill::new(
        "Consulta",
        200.0,
        date(2024, 3, 3),
        Category::Health,
        BillType::Payable,
    );
    let lone_id = book.add_series(lone, &mut SequentialIds(100));

    book.delete_series(root).expect("delete series");
    assert_eq!(book.len(), 1);
    assert!(book.get(lone_id).is_some());
}

#[test]
fn single_instance_delete_keeps_the_rest_of_the_series() {
    let (mut book, root) = book_with_series();
    let member = book
        .bills
        .iter()
        .find(|bill| bill.parent_id == Some(root))
        .map(|bill| bill.id)
        .expect("generated member");

    book.delete_one(member).expect("delete one");
    assert_eq!(book.len(), 3);
    assert!(book.get(root).is_some());
    assert!(book.get(member).is_none());
}

#[test]
fn series_membership_covers_roots_and_members() {
    let (mut book, root) = book_with_series();
    let member = book
        .bills
        .iter()
        .find(|bill| bill.parent_id == Some(root))
        .map(|bill| bill.id)
        .unwrap();
    assert!(book.is_series_member(root).unwrap());
    assert!(book.is_series_member(member).unwrap());

    let lone_id = book.add_series(
        Bill::new(
            "Cinema",
            40.0,
            date(2024, 3, 9),
            Category::Entertainment,
            BillType::Payable,
        ),
        &mut SequentialIds(200),
    );
    assert!(!book.is_series_member(lone_id).unwrap());
}

#[test]
fn toggle_paid_flips_only_the_target() {
    let (mut book, root) = book_with_series();
    assert!(book.toggle_paid(root).expect("toggle"));
    assert!(book.get(root).unwrap().is_paid);
    assert!(book
        .bills
        .iter()
        .filter(|bill| bill.id != root)
        .all(|bill| !bill.is_paid));

    assert!(!book.toggle_paid(root).expect("toggle back"));
}

#[test]
fn edits_mutate_in_place_without_reexpansion() {
    let (mut book, root) = book_with_series();
    book.update(root, |bill| {
        bill.amount = 375.0;
        bill.notes = Some("reajuste".into());
    })
    .expect("update");

    assert_eq!(book.len(), 4, "editing never re-expands");
    let edited = book.get(root).unwrap();
    assert_eq!(edited.amount, 375.0);
    assert_eq!(edited.notes.as_deref(), Some("reajuste"));
}

#[test]
fn unknown_ids_are_rejected() {
    let (mut book, _) = book_with_series();
    let ghost = Uuid::from_u128(9999);
    assert!(book.delete_one(ghost).is_err());
    assert!(book.delete_series(ghost).is_err());
    assert!(book.toggle_paid(ghost).is_err());
    assert!(book.is_series_member(ghost).is_err());
}
