use super::*;

fn item(id: i64, promoted: bool) -> MenuItem {
    MenuItem {
        id: ItemId(id),
        name: format!("item-{id}"),
        notes: String::new(),
        price_units: 100,
        image_path: format!("/images/{id}.png"),
        is_vegetarian: false,
        is_promoted: promoted,
    }
}

fn ids(model: &MenuModel) -> Vec<i64> {
    model.items().iter().map(|item| item.id.0).collect()
}

#[test]
fn apply_is_a_stable_promoted_first_partition() {
    let mut model = MenuModel::new();
    model.apply(vec![
        item(1, false),
        item(2, true),
        item(3, false),
        item(4, true),
        item(5, false),
        item(6, true),
    ]);

    assert_eq!(ids(&model), vec![2, 4, 6, 1, 3, 5]);
    assert_eq!(model.count(), 6);
}

#[test]
fn apply_replaces_previous_contents_wholesale() {
    let mut model = MenuModel::new();
    model.apply(vec![item(1, false), item(2, false)]);
    model.apply(vec![item(3, true)]);

    assert_eq!(ids(&model), vec![3]);
    assert!(model.find(ItemId(1)).is_none());
    assert_eq!(model.find(ItemId(3)).map(|item| item.is_promoted), Some(true));
}

#[test]
fn starts_empty_and_reports_out_of_bounds_index() {
    let mut model = MenuModel::new();
    assert!(model.is_empty());
    assert_eq!(model.count(), 0);
    assert_eq!(model.item_at(0), Err(IndexError { index: 0, count: 0 }));

    model.apply(vec![item(1, false)]);
    assert!(!model.is_empty());
    assert_eq!(model.item_at(0).map(|item| item.id), Ok(ItemId(1)));
    assert_eq!(model.item_at(1), Err(IndexError { index: 1, count: 1 }));
}

#[test]
fn only_latest_fetch_ticket_is_accepted() {
    let mut sequencer = FetchSequencer::new();
    assert_eq!(sequencer.latest(), None);

    let first = sequencer.begin();
    assert!(sequencer.accept(first));

    let second = sequencer.begin();
    assert!(!sequencer.accept(first));
    assert!(sequencer.accept(second));
    assert!(second > first);
    assert_eq!(sequencer.latest(), Some(second));
    assert_eq!(second.sequence(), 2);
}

#[test]
fn out_of_order_completion_keeps_newest_result() {
    let mut sequencer = FetchSequencer::new();
    let mut model = MenuModel::new();
    let older = sequencer.begin();
    let newer = sequencer.begin();

    for (ticket, items) in [
        (newer, vec![item(2, false)]),
        (older, vec![item(1, false)]),
    ] {
        if sequencer.accept(ticket) {
            model.apply(items);
        }
    }

    assert_eq!(ids(&model), vec![2]);
}
