use roster_core::{
    Avatar, HeadlessRenderer, MemoryKeyValueStore, Projection, RosterStore, StudentFields,
    StudentInput, ViewProjector,
};

fn fields(first: &str, programme: &str, interests: &str) -> StudentFields {
    StudentInput {
        first_name: first.to_string(),
        last_name: "Tester".to_string(),
        email: format!("{}@x.com", first.to_lowercase()),
        programme: programme.to_string(),
        year: Some("1".to_string()),
        interests: interests.to_string(),
        photo_url: String::new(),
    }
    .normalize()
}

struct Harness {
    store: RosterStore<MemoryKeyValueStore>,
    projector: ViewProjector,
    renderer: HeadlessRenderer,
}

impl Harness {
    fn new() -> Self {
        Self {
            store: RosterStore::new(MemoryKeyValueStore::new(), "students"),
            projector: ViewProjector::new(),
            renderer: HeadlessRenderer::new(),
        }
    }

    fn reconcile(&mut self, filter: &str) -> roster_core::ReconcileReport {
        self.projector
            .reconcile(self.store.all(), filter, &mut self.renderer)
    }

    fn ids(&self) -> Vec<i64> {
        self.store.all().iter().map(|record| record.id()).collect()
    }
}

#[test]
fn card_order_follows_roster_and_table_is_newest_first() {
    let mut h = Harness::new();
    for name in ["Ada", "Alan", "Grace"] {
        h.store.create(fields(name, "CS", "")).unwrap();
        h.reconcile("");
    }
    let ids = h.ids();
    let reversed: Vec<i64> = ids.iter().rev().copied().collect();

    assert_eq!(h.renderer.ids(Projection::Card), ids);
    assert_eq!(h.renderer.ids(Projection::Table), reversed);
    assert_eq!(h.projector.node_order(Projection::Card), ids.as_slice());
}

#[test]
fn update_replaces_nodes_in_place_in_both_projections() {
    let mut h = Harness::new();
    for name in ["Ada", "Alan", "Grace"] {
        h.store.create(fields(name, "CS", "")).unwrap();
    }
    h.reconcile("");
    let ids = h.ids();

    h.store.update(ids[1], fields("Barbara", "CS", "")).unwrap();
    let report = h.reconcile("");

    assert_eq!(report.cards.replaced, 1);
    assert_eq!(report.rows.replaced, 1);
    assert_eq!(report.cards.created, 0);
    assert_eq!(h.renderer.ids(Projection::Card), ids);
    let card = h.renderer.node(ids[1], Projection::Card).unwrap();
    assert!(card.text.starts_with("Barbara Tester"));
    let row = h.renderer.node(ids[1], Projection::Table).unwrap();
    assert!(row.text.starts_with("Barbara Tester | CS | Year 1"));
    assert_eq!(h.renderer.ids(Projection::Table)[1], ids[1]);
}

#[test]
fn removed_records_lose_their_nodes() {
    let mut h = Harness::new();
    h.store.create(fields("Ada", "CS", "")).unwrap();
    let alan = h.store.create(fields("Alan", "CS", "")).unwrap();
    h.reconcile("");

    h.store.remove(alan.id()).unwrap();
    let report = h.reconcile("");

    assert_eq!(report.cards.removed, 1);
    assert_eq!(report.rows.removed, 1);
    assert_eq!(h.renderer.nodes(Projection::Card).len(), 1);
    assert_eq!(h.renderer.nodes(Projection::Table).len(), 1);
    assert_eq!(h.projector.is_visible(alan.id(), Projection::Card), None);
}

#[test]
fn filter_hides_without_removing_and_restores_order() {
    let mut h = Harness::new();
    h.store.create(fields("Ada", "CS", "music")).unwrap();
    h.store.create(fields("Alan", "Maths", "chess")).unwrap();
    h.store.create(fields("Grace", "CS", "music, navy")).unwrap();
    h.reconcile("");
    let ids = h.ids();

    let report = h.reconcile("MUSIC");
    assert_eq!(report.cards.hidden, 1);
    assert_eq!(report.rows.hidden, 1);
    assert_eq!(report.matched, 2);
    assert_eq!(h.renderer.ids(Projection::Card), ids);
    assert_eq!(
        h.renderer.visible_ids(Projection::Card),
        vec![ids[0], ids[2]]
    );
    assert_eq!(h.projector.count_label(), "Displaying 2 student profiles");

    let report = h.reconcile("");
    assert_eq!(report.cards.shown, 1);
    assert_eq!(h.renderer.visible_ids(Projection::Card), ids);
    assert_eq!(h.projector.count_label(), "Displaying 3 student profiles");
}

#[test]
fn applying_same_filter_twice_is_idempotent() {
    let mut h = Harness::new();
    h.store.create(fields("Ada", "CS", "music")).unwrap();
    h.store.create(fields("Alan", "Maths", "chess")).unwrap();

    h.reconcile("year 1 chess");
    let matched_once = h.renderer.visible_ids(Projection::Card);
    let calls = h.renderer.call_count();

    let report = h.reconcile("year 1 chess");
    assert!(report.is_noop());
    assert_eq!(h.renderer.call_count(), calls);
    assert_eq!(h.renderer.visible_ids(Projection::Card), matched_once);
}

#[test]
fn count_uses_total_when_filter_is_blank() {
    let mut h = Harness::new();
    h.store.create(fields("Ada", "CS", "")).unwrap();
    h.store.create(fields("Alan", "Maths", "")).unwrap();

    h.reconcile("maths");
    assert_eq!(h.projector.display_count(), 1);

    h.reconcile("   ");
    assert_eq!(h.projector.display_count(), 2);
    assert_eq!(h.projector.matched_count(), 2);
}

#[test]
fn card_avatar_falls_back_to_initials_on_photo_failure() {
    let mut h = Harness::new();
    let input = StudentInput {
        photo_url: "https://img.example/broken.png".to_string(),
        ..fields("Ada", "CS", "").to_input()
    };
    let record = h.store.create(input.normalize()).unwrap();
    h.reconcile("");

    let card = h.renderer.node(record.id(), Projection::Card).unwrap();
    assert!(matches!(card.avatar, Some(Avatar::Photo(_))));

    h.renderer.fail_photo(&record);
    let card = h.renderer.node(record.id(), Projection::Card).unwrap();
    assert_eq!(card.avatar, Some(Avatar::Initials("AT".to_string())));
    assert_eq!(h.store.find_by_id(record.id()), Some(&record));
}
