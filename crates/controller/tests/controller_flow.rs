//! End-to-end controller flows against in-memory collaborator fakes.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use parishkeep_controller::{DateRange, InventoryController};
use parishkeep_core::EngineError;
use parishkeep_directory::{
    DirectoryError, ItemDirectory, MinistryDirectory, ReportArtifact, ReportInput, ReportRenderer,
};
use parishkeep_inventory::{FilterState, InventoryItem, ItemPayload, ItemStatus};

fn reference_now() -> DateTime<Utc> {
    "2026-06-15T00:00:00Z".parse().unwrap()
}

fn payload(name: &str, ministry: &str, cost: f64) -> ItemPayload {
    ItemPayload {
        item_name: name.to_string(),
        description: String::new(),
        acquisition_date: Some(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()),
        acquisition_cost: cost,
        salvage_value: 0.0,
        useful_life_years: Some(5),
        quantity: 1,
        status: ItemStatus::Good,
        label: parishkeep_inventory::ItemLabel::ChurchProvided,
        remarks: String::new(),
        ministry_name: ministry.to_string(),
    }
}

/// In-memory item directory. Mirrors the real service's behavior of
/// owning the records: ids are assigned here and names are stored trimmed,
/// so refetches observably return server-confirmed state.
#[derive(Default)]
struct FakeItemDirectory {
    items: Mutex<Vec<InventoryItem>>,
    next_id: Mutex<i64>,
    reject_mutations_with: Mutex<Option<String>>,
    fail_listing: Mutex<bool>,
}

impl FakeItemDirectory {
    fn seeded(items: Vec<InventoryItem>) -> Self {
        let next_id = items.iter().filter_map(|i| i.id).max().unwrap_or(0) + 1;
        Self {
            items: Mutex::new(items),
            next_id: Mutex::new(next_id),
            ..Self::default()
        }
    }

    fn reject_mutations(&self, message: &str) {
        *self.reject_mutations_with.lock().unwrap() = Some(message.to_string());
    }

    fn fail_listing(&self) {
        *self.fail_listing.lock().unwrap() = true;
    }

    fn check_rejection(&self) -> Result<(), DirectoryError> {
        match self.reject_mutations_with.lock().unwrap().as_ref() {
            Some(message) => Err(DirectoryError::Api {
                status: 400,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }

    fn store(&self, id: Option<i64>, payload: &ItemPayload) -> InventoryItem {
        InventoryItem {
            id,
            item_name: payload.item_name.trim().to_string(),
            description: payload.description.clone(),
            acquisition_date: payload
                .acquisition_date
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|dt| dt.and_utc()),
            acquisition_cost: payload.acquisition_cost,
            salvage_value: payload.salvage_value,
            useful_life_years: payload.useful_life_years,
            quantity: payload.quantity,
            status: payload.status,
            label: payload.label,
            remarks: payload.remarks.clone(),
            ministry_name: payload.ministry_name.clone(),
        }
    }
}

#[async_trait]
impl ItemDirectory for FakeItemDirectory {
    async fn list_items(
        &self,
        _page_size_hint: usize,
    ) -> Result<Vec<InventoryItem>, DirectoryError> {
        if *self.fail_listing.lock().unwrap() {
            return Err(DirectoryError::Network("connection refused".to_string()));
        }
        Ok(self.items.lock().unwrap().clone())
    }

    async fn create_item(&self, payload: &ItemPayload) -> Result<(), DirectoryError> {
        self.check_rejection()?;
        let id = {
            let mut next = self.next_id.lock().unwrap();
            *next += 1;
            *next - 1
        };
        let item = self.store(Some(id), payload);
        self.items.lock().unwrap().push(item);
        Ok(())
    }

    async fn update_item(&self, id: i64, payload: &ItemPayload) -> Result<(), DirectoryError> {
        self.check_rejection()?;
        let mut items = self.items.lock().unwrap();
        match items.iter_mut().find(|i| i.id == Some(id)) {
            Some(slot) => {
                *slot = self.store(Some(id), payload);
                Ok(())
            }
            None => Err(DirectoryError::Api {
                status: 404,
                message: "not found".to_string(),
            }),
        }
    }

    async fn delete_item(&self, id: i64) -> Result<(), DirectoryError> {
        self.check_rejection()?;
        self.items.lock().unwrap().retain(|i| i.id != Some(id));
        Ok(())
    }
}

struct FakeMinistryDirectory {
    names: Vec<String>,
}

#[async_trait]
impl MinistryDirectory for FakeMinistryDirectory {
    async fn list_ministries(&self) -> Result<Vec<String>, DirectoryError> {
        Ok(self.names.clone())
    }
}

#[derive(Debug, Clone)]
struct CapturedReport {
    item_names: Vec<String>,
    summary_total_items: usize,
}

#[derive(Default)]
struct CapturingRenderer {
    last: Mutex<Option<CapturedReport>>,
}

#[async_trait]
impl ReportRenderer for CapturingRenderer {
    async fn render(&self, input: ReportInput<'_>) -> Result<ReportArtifact, DirectoryError> {
        *self.last.lock().unwrap() = Some(CapturedReport {
            item_names: input.items.iter().map(|i| i.item_name.clone()).collect(),
            summary_total_items: input.summary.total_items,
        });
        Ok(ReportArtifact {
            file_name: "inventory-report.pdf".to_string(),
            content_type: "application/pdf".to_string(),
            bytes: b"%PDF".to_vec(),
        })
    }
}

fn seed_item(id: i64, name: &str, ministry: &str, acquired: &str) -> InventoryItem {
    InventoryItem {
        id: Some(id),
        item_name: name.to_string(),
        acquisition_date: Some(acquired.parse().unwrap()),
        acquisition_cost: 100.0,
        quantity: 1,
        status: ItemStatus::Good,
        ministry_name: ministry.to_string(),
        ..InventoryItem::default()
    }
}

type TestController =
    InventoryController<Arc<FakeItemDirectory>, Arc<FakeMinistryDirectory>, Arc<CapturingRenderer>>;

fn controller(
    items: Vec<InventoryItem>,
    ministries: &[&str],
) -> (TestController, Arc<FakeItemDirectory>, Arc<CapturingRenderer>) {
    let directory = Arc::new(FakeItemDirectory::seeded(items));
    let ministries = Arc::new(FakeMinistryDirectory {
        names: ministries.iter().map(|s| s.to_string()).collect(),
    });
    let renderer = Arc::new(CapturingRenderer::default());
    let controller = InventoryController::new(directory.clone(), ministries, renderer.clone());
    (controller, directory, renderer)
}

#[tokio::test]
async fn load_populates_collection_and_ministry_options() -> anyhow::Result<()> {
    let (mut ctl, _, _) = controller(
        vec![
            seed_item(1, "Projector", "Worship", "2024-03-01T00:00:00Z"),
            seed_item(2, "Canopy", "Outreach", "2023-01-10T00:00:00Z"),
        ],
        &["Worship", "Events"],
    );

    ctl.load().await?;

    assert_eq!(ctl.items().len(), 2);
    assert!(ctl.last_error().is_none());
    assert!(!ctl.is_loading());
    // "Events" is dropped; "Outreach" comes from the items alone.
    assert_eq!(ctl.ministry_options(), vec!["Outreach", "Worship"]);
    Ok(())
}

#[tokio::test]
async fn load_failure_clears_the_collection_and_records_the_error() {
    let (mut ctl, directory, _) = controller(
        vec![seed_item(1, "Projector", "Worship", "2024-03-01T00:00:00Z")],
        &["Worship"],
    );

    ctl.load().await.unwrap();
    assert_eq!(ctl.items().len(), 1);

    directory.fail_listing();
    let err = ctl.load().await.unwrap_err();

    assert!(matches!(err, EngineError::FetchFailure(_)));
    assert!(ctl.items().is_empty());
    assert_eq!(ctl.last_error(), Some(&err));
    assert!(!ctl.is_loading());
}

#[tokio::test]
async fn create_refetches_server_confirmed_state() -> anyhow::Result<()> {
    let (mut ctl, _, _) = controller(vec![], &["Worship"]);
    ctl.load().await?;

    // The service trims names and assigns the id; the controller must show
    // that, not the raw payload.
    ctl.create(&payload("  New Keyboard  ", "Worship", 1_200.0)).await?;

    assert_eq!(ctl.items().len(), 1);
    assert_eq!(ctl.items()[0].item_name, "New Keyboard");
    assert_eq!(ctl.items()[0].id, Some(1));
    Ok(())
}

#[tokio::test]
async fn update_and_delete_round_trip_through_the_directory() -> anyhow::Result<()> {
    let (mut ctl, _, _) = controller(
        vec![
            seed_item(1, "Projector", "Worship", "2024-03-01T00:00:00Z"),
            seed_item(2, "Canopy", "Outreach", "2023-01-10T00:00:00Z"),
        ],
        &[],
    );
    ctl.load().await?;

    let mut changed = payload("Projector HD", "Worship", 2_000.0);
    changed.quantity = 2;
    ctl.update(1, &changed).await?;
    assert_eq!(ctl.items()[0].item_name, "Projector HD");
    assert_eq!(ctl.items()[0].quantity, 2);

    ctl.delete(2).await?;
    assert_eq!(ctl.items().len(), 1);
    Ok(())
}

#[tokio::test]
async fn rejected_mutation_leaves_collection_and_pagination_untouched() {
    let items: Vec<InventoryItem> = (1..=23)
        .map(|i| seed_item(i, &format!("Asset {i}"), "Worship", "2024-03-01T00:00:00Z"))
        .collect();
    let (mut ctl, directory, _) = controller(items, &["Worship"]);
    ctl.load().await.unwrap();
    ctl.set_page(2);

    let before = ctl.items().to_vec();
    directory.reject_mutations("an item with this name already exists");

    let err = ctl
        .create(&payload("Asset 1", "Worship", 50.0))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        EngineError::MutationFailure("an item with this name already exists".to_string())
    );
    assert_eq!(ctl.items(), &before[..]);
    assert_eq!(ctl.pagination().page(), 2);
    assert_eq!(ctl.current_page().page, 2);
    assert_eq!(ctl.last_error(), Some(&err));
}

#[tokio::test]
async fn error_slot_clears_when_the_next_operation_begins() {
    let (mut ctl, directory, _) = controller(vec![], &[]);
    directory.reject_mutations("quantity must be positive");
    ctl.load().await.unwrap();

    assert!(ctl.create(&payload("X", "Worship", 1.0)).await.is_err());
    assert!(ctl.last_error().is_some());

    // Next operation implicitly clears the slot.
    *directory.reject_mutations_with.lock().unwrap() = None;
    ctl.load().await.unwrap();
    assert!(ctl.last_error().is_none());
}

#[tokio::test]
async fn out_of_range_page_is_served_clamped() {
    let items: Vec<InventoryItem> = (1..=23)
        .map(|i| seed_item(i, &format!("Asset {i}"), "Worship", "2024-03-01T00:00:00Z"))
        .collect();
    let (mut ctl, _, _) = controller(items, &[]);
    ctl.load().await.unwrap();
    ctl.set_page(4);

    let view = ctl.current_page();
    assert_eq!(view.total_pages, 3);
    assert_eq!(view.page, 3);
    let names: Vec<&str> = view.items.iter().map(|i| i.item_name.as_str()).collect();
    assert_eq!(names, vec!["Asset 21", "Asset 22", "Asset 23"]);
}

#[tokio::test]
async fn export_applies_the_date_bound_on_top_of_filters() -> anyhow::Result<()> {
    let mut undated = seed_item(3, "Undated banner", "Worship", "2024-03-01T00:00:00Z");
    undated.acquisition_date = None;

    let (mut ctl, _, renderer) = controller(
        vec![
            seed_item(1, "Projector", "Worship", "2024-03-01T00:00:00Z"),
            seed_item(2, "Canopy", "Outreach", "2022-06-01T00:00:00Z"),
            undated,
        ],
        &[],
    );
    ctl.load().await?;

    ctl.set_filters(FilterState {
        ministry: "worship".to_string(),
        ..FilterState::default()
    });

    let range = DateRange {
        from: Some(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()),
        to: None,
    };
    let artifact = ctl.export_report(Some(range), reference_now()).await?;
    assert_eq!(artifact.content_type, "application/pdf");

    let captured = renderer.last.lock().unwrap().clone().unwrap();
    // Canopy fails the ministry filter; the undated banner is excluded
    // while a bound is active.
    assert_eq!(captured.item_names, vec!["Projector"]);
    // The summary still covers the whole collection.
    assert_eq!(captured.summary_total_items, 3);
    Ok(())
}

#[tokio::test]
async fn observers_are_notified_of_state_transitions() -> anyhow::Result<()> {
    let (mut ctl, _, _) = controller(
        vec![seed_item(1, "Projector", "Worship", "2024-03-01T00:00:00Z")],
        &[],
    );

    let seen = Arc::new(AtomicUsize::new(0));
    let counter = seen.clone();
    ctl.subscribe(Arc::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    }));

    ctl.load().await?;
    let after_load = seen.load(Ordering::SeqCst);
    assert!(after_load >= 2); // loading on + loading off at minimum

    ctl.set_search("proj");
    assert_eq!(seen.load(Ordering::SeqCst), after_load + 1);
    Ok(())
}
