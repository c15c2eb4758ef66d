//! Root application component
//!
//! The App struct implements the Component trait, acting as the root
//! component that delegates event handling and rendering to child
//! components. All store access and query recomputation happens here; the
//! views only ever see prepared display data.

use crate::action::Action;
use crate::component::Component;
use crate::components::{
    calculate_main_layout, ActivityEntry, DashboardView, DeleteDialog, HelpDialog, QuitDialog,
    RecordFormDialog, RecordRow, RecordsView, StatusFilterDialog,
};
use crate::config::Config;
use crate::export::{export_csv, export_report, report_file_name, CSV_FILE_NAME};
use crate::model::{
    aggregate, paginate, query, recent_activity, Modal, ModalStack, QueryState, Record, View,
};
use crate::store::{JsonFileStore, RecordStore};
use anyhow::Result;
use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Tabs},
    Frame,
};
use std::fs;
use std::path::PathBuf;

/// Recent registrations shown on the dashboard
const RECENT_LIMIT: usize = 5;

/// Notification lifetime in ticks (100ms each)
const NOTIFICATION_TICKS: u32 = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

/// Transient status bar message
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
    remaining_ticks: u32,
}

/// Main application state - coordinates between components
pub struct App {
    /// Active top-level view
    pub view: View,

    /// The whole record collection, refreshed wholesale from the store
    pub records: Vec<Record>,

    /// Persistence backend
    store: Box<dyn RecordStore>,

    /// Search, filter, sort and pagination knobs
    pub query: QueryState,

    /// Modal overlay stack
    pub modals: ModalStack,

    /// Flag to indicate the app should quit
    pub should_quit: bool,

    /// Transient status bar message
    pub notification: Option<Notification>,

    pub config: Config,

    // Child components
    pub dashboard: DashboardView,
    pub records_view: RecordsView,
    pub quit_dialog: QuitDialog,
    pub form: RecordFormDialog,
    pub delete_dialog: DeleteDialog,
    pub status_filter_dialog: StatusFilterDialog,
    pub help_dialog: HelpDialog,
}

impl App {
    /// Create the app against the configured JSON file store
    pub fn new() -> App {
        let config = Config::load().unwrap_or_default();
        let store_path = if config.store_path.is_empty() {
            JsonFileStore::default_path().unwrap_or_else(|| PathBuf::from("records.json"))
        } else {
            PathBuf::from(&config.store_path)
        };
        let store = Box::new(JsonFileStore::new(store_path));
        Self::with_store(store, config)
    }

    /// Create the app against an arbitrary store (tests use this)
    pub fn with_store(store: Box<dyn RecordStore>, config: Config) -> App {
        let mut app = App {
            view: View::Dashboard,
            records: Vec::new(),
            store,
            query: QueryState::with_page_size(config.default_page_size),
            modals: ModalStack::new(),
            should_quit: false,
            notification: None,
            config,
            dashboard: DashboardView::default(),
            records_view: RecordsView::default(),
            quit_dialog: QuitDialog,
            form: RecordFormDialog::default(),
            delete_dialog: DeleteDialog::default(),
            status_filter_dialog: StatusFilterDialog::new(),
            help_dialog: HelpDialog::default(),
        };
        app.reload(false);
        app
    }

    pub fn notify(&mut self, kind: NotificationKind, message: impl Into<String>) {
        self.notification = Some(Notification {
            message: message.into(),
            kind,
            remaining_ticks: NOTIFICATION_TICKS,
        });
    }

    /// Re-fetch the collection from the store
    ///
    /// On failure the working set is kept as-is and the error lands in the
    /// status bar. The page number deliberately survives the refresh.
    fn reload(&mut self, announce: bool) {
        match self.store.fetch_all() {
            Ok(records) => {
                self.records = records;
                if announce {
                    self.notify(NotificationKind::Info, "Records reloaded");
                }
            }
            Err(e) => {
                self.notify(NotificationKind::Error, format!("Load failed: {e}"));
            }
        }
        self.refresh_views();
    }

    /// Recompute the filtered set and push display data into both views
    fn refresh_views(&mut self) {
        let filtered = query(&self.records, &self.query.params);
        let page = paginate(&filtered, self.query.page_size, self.query.page);

        let rows: Vec<RecordRow> = page
            .items
            .iter()
            .map(|r| RecordRow {
                id: r.id.clone(),
                full_name: r.full_name.clone(),
                tax_id: r.tax_id.clone(),
                registration_code: r.registration_code.clone(),
                display_date: r.display_date(),
                contact_info: r.contact_info.clone(),
                status: r.status.clone(),
            })
            .collect();
        self.records_view.set_page(
            rows,
            page.page,
            page.total_pages,
            filtered.len(),
            self.records.len(),
        );

        let recent: Vec<ActivityEntry> = recent_activity(&self.records, RECENT_LIMIT)
            .into_iter()
            .map(|r| ActivityEntry {
                initial: r.initial(),
                full_name: r.full_name.clone(),
                display_date: r.display_date(),
                status: r.status.clone(),
            })
            .collect();
        self.dashboard
            .set_data(aggregate(&self.records), self.records.len(), recent);
    }

    fn total_pages(&self) -> usize {
        let filtered = query(&self.records, &self.query.params);
        paginate(&filtered, self.query.page_size, self.query.page).total_pages
    }

    /// Record behind the current table selection
    fn selected_record(&self) -> Option<&Record> {
        let row = self.records_view.selected_row()?;
        let id = row.id.as_ref()?;
        self.records
            .iter()
            .find(|r| r.id.as_deref() == Some(id.as_str()))
    }

    fn export_path(&self, file_name: &str) -> PathBuf {
        self.config.export_dir().join(file_name)
    }

    fn run_csv_export(&mut self) {
        let filtered = query(&self.records, &self.query.params);
        let path = self.export_path(CSV_FILE_NAME);
        let result = export_csv(&filtered).and_then(|bytes| Ok(fs::write(&path, bytes)?));
        match result {
            Ok(()) => self.notify(
                NotificationKind::Success,
                format!("Exported {} records to {}", filtered.len(), path.display()),
            ),
            Err(e) => self.notify(NotificationKind::Error, format!("CSV export failed: {e}")),
        }
    }

    fn run_report_export(&mut self) {
        let filtered = query(&self.records, &self.query.params);
        let now = Local::now();
        let path = self.export_path(&report_file_name(now));
        let bytes = export_report(&filtered, now);
        match fs::write(&path, bytes) {
            Ok(()) => self.notify(
                NotificationKind::Success,
                format!("Exported {} records to {}", filtered.len(), path.display()),
            ),
            Err(e) => self.notify(
                NotificationKind::Error,
                format!("Report export failed: {e}"),
            ),
        }
    }

    fn handle_modal_key_event(&mut self, modal: &Modal, key: KeyEvent) -> Result<Option<Action>> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.handle_key_event(key),
            Modal::RecordForm => self.form.handle_key_event(key),
            Modal::DeleteConfirm { .. } => self.delete_dialog.handle_key_event(key),
            Modal::StatusFilter => self.status_filter_dialog.handle_key_event(key),
            Modal::Help => self.help_dialog.handle_key_event(key),
        }
    }

    fn handle_global_key_event(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::ForceQuit)
            }
            KeyCode::Char('q') => Some(Action::OpenQuitDialog),
            KeyCode::Char('?') => Some(Action::OpenHelp),
            KeyCode::Tab => Some(Action::NextView),
            KeyCode::Char('R') => Some(Action::ReloadRecords),
            KeyCode::Char('c') => Some(Action::ExportCsv),
            KeyCode::Char('w') => Some(Action::ExportReport),
            _ => None,
        }
    }

    fn draw_tabs(&self, frame: &mut Frame, area: Rect) {
        let titles: Vec<Line> = View::all().iter().map(|v| Line::from(v.name())).collect();
        let selected = View::all()
            .iter()
            .position(|v| *v == self.view)
            .unwrap_or(0);
        let tabs = Tabs::new(titles)
            .select(selected)
            .style(Style::default().fg(Color::DarkGray))
            .highlight_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .divider(" │ ");
        frame.render_widget(tabs, area);
    }

    fn draw_status_bar(&self, frame: &mut Frame, area: Rect) {
        let line = match &self.notification {
            Some(n) => {
                let color = match n.kind {
                    NotificationKind::Success => Color::Green,
                    NotificationKind::Error => Color::Red,
                    NotificationKind::Info => Color::Cyan,
                };
                Line::from(Span::styled(
                    n.message.clone(),
                    Style::default().fg(color),
                ))
            }
            None => Line::from(""),
        };
        frame.render_widget(Paragraph::new(line), area);
    }

    fn draw_help_bar(&self, frame: &mut Frame, area: Rect) {
        let hint = match self.view {
            View::Dashboard => "Tab views  c export CSV  w export report  R reload  ? help  q quit",
            View::Records => {
                "Tab views  / search  s status  n/d sort  a add  e edit  x delete  ? help  q quit"
            }
        };
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                hint,
                Style::default().fg(Color::DarkGray),
            ))),
            area,
        );
    }

    fn draw_modal(&mut self, frame: &mut Frame, area: Rect, modal: &Modal) -> Result<()> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.draw(frame, area)?,
            Modal::RecordForm => self.form.draw(frame, area)?,
            Modal::DeleteConfirm { .. } => self.delete_dialog.draw(frame, area)?,
            Modal::StatusFilter => self.status_filter_dialog.draw(frame, area)?,
            Modal::Help => self.help_dialog.draw(frame, area)?,
        }
        Ok(())
    }
}

impl Component for App {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if let Some(modal) = self.modals.top().cloned() {
            return self.handle_modal_key_event(&modal, key);
        }

        if self.view == View::Records && self.records_view.search_active {
            return self.records_view.handle_key_event(key);
        }

        if let Some(action) = self.handle_global_key_event(key) {
            return Ok(Some(action));
        }

        match self.view {
            View::Dashboard => Ok(None),
            View::Records => self.records_view.handle_key_event(key),
        }
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::Tick => {
                if let Some(ref mut n) = self.notification {
                    n.remaining_ticks = n.remaining_ticks.saturating_sub(1);
                    if n.remaining_ticks == 0 {
                        self.notification = None;
                    }
                }
            }
            Action::Resize(_, _) => {}
            Action::ForceQuit => {
                self.should_quit = true;
            }

            Action::NextView => {
                self.view = match self.view {
                    View::Dashboard => View::Records,
                    View::Records => View::Dashboard,
                };
            }
            Action::NextItem | Action::PrevItem => {
                self.records_view.update(action)?;
            }
            Action::NextPage => {
                let total_pages = self.total_pages();
                self.query.next_page(total_pages);
                self.refresh_views();
            }
            Action::PrevPage => {
                self.query.prev_page();
                self.refresh_views();
            }
            Action::CyclePageSize => {
                self.query.cycle_page_size();
                // The chosen size becomes the default for the next session
                self.config.default_page_size = self.query.page_size;
                if let Err(e) = self.config.save() {
                    self.notify(NotificationKind::Error, format!("Config save failed: {e}"));
                }
                self.refresh_views();
            }

            Action::EnterSearchMode | Action::ExitSearchMode => {
                self.records_view.update(action)?;
            }
            Action::SearchInput(c) => {
                self.query.push_search_char(c);
                self.refresh_views();
            }
            Action::SearchBackspace => {
                self.query.pop_search_char();
                self.refresh_views();
            }
            Action::ClearSearch => {
                self.query.clear_search();
                self.refresh_views();
            }

            Action::OpenStatusFilter => {
                self.status_filter_dialog
                    .open_with(&self.query.params.status_filter);
                self.modals.push(Modal::StatusFilter);
            }
            Action::SetStatusFilter(filter) => {
                self.modals.pop();
                self.query.set_status_filter(filter);
                self.refresh_views();
            }
            Action::ToggleSort(field) => {
                self.query.toggle_sort(field);
                self.refresh_views();
            }

            Action::OpenAddForm => {
                self.form.open_add();
                self.modals.push(Modal::RecordForm);
            }
            Action::OpenEditForm => {
                if let Some(record) = self.selected_record().cloned() {
                    self.form.open_edit(&record);
                    self.modals.push(Modal::RecordForm);
                }
            }
            Action::SubmitForm => {
                self.modals.pop();
                let editing = self.form.is_edit();
                match self.store.upsert(self.form.draft.clone()) {
                    Ok(_) => {
                        self.notify(
                            NotificationKind::Success,
                            if editing {
                                "Record updated"
                            } else {
                                "Record added"
                            },
                        );
                        self.reload(false);
                    }
                    Err(e) => {
                        self.notify(NotificationKind::Error, format!("Save failed: {e}"));
                    }
                }
            }
            Action::OpenDeleteConfirm => {
                let target = self
                    .records_view
                    .selected_row()
                    .and_then(|row| row.id.clone().map(|id| (id, row.full_name.clone())));
                if let Some((id, full_name)) = target {
                    self.delete_dialog.set_target(&id, &full_name);
                    self.modals.push(Modal::DeleteConfirm { id, full_name });
                }
            }
            Action::ConfirmDelete(id) => {
                self.modals.pop();
                match self.store.delete(&id) {
                    Ok(()) => {
                        self.notify(NotificationKind::Success, "Record deleted");
                        self.reload(false);
                    }
                    Err(e) => {
                        self.notify(NotificationKind::Error, format!("Delete failed: {e}"));
                    }
                }
            }
            Action::ReloadRecords => {
                self.reload(true);
            }

            Action::ExportCsv => self.run_csv_export(),
            Action::ExportReport => self.run_report_export(),

            Action::OpenQuitDialog => {
                self.modals.push(Modal::QuitConfirm);
            }
            Action::OpenHelp => {
                self.help_dialog.scroll_offset = 0;
                self.modals.push(Modal::Help);
            }
            Action::CloseModal => {
                self.modals.pop();
            }
            Action::ModalUp | Action::ModalDown => {
                if let Some(Modal::Help) = self.modals.top() {
                    self.help_dialog.update(action)?;
                }
            }
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let show_filter = self.view == View::Records;
        let layout = calculate_main_layout(area, show_filter);

        self.draw_tabs(frame, layout.tabs);

        match self.view {
            View::Dashboard => {
                self.dashboard.draw(frame, layout.body)?;
            }
            View::Records => {
                self.records_view
                    .draw_filter_bar(frame, layout.filter, &self.query)?;
                self.records_view.draw_table(frame, layout.body, &self.query)?;
            }
        }

        self.draw_status_bar(frame, layout.status);
        self.draw_help_bar(frame, layout.help);

        if let Some(modal) = self.modals.top().cloned() {
            self.draw_modal(frame, area, &modal)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{seed_records, SortField, Status, StatusFilter};
    use crate::store::StoreError;

    /// In-memory store for exercising the app without touching disk
    struct MemoryStore {
        records: Vec<Record>,
        fail_reads: bool,
    }

    impl MemoryStore {
        fn seeded() -> Self {
            Self {
                records: seed_records(),
                fail_reads: false,
            }
        }
    }

    impl RecordStore for MemoryStore {
        fn fetch_all(&self) -> Result<Vec<Record>, StoreError> {
            if self.fail_reads {
                return Err(StoreError::NotFound("unavailable".to_string()));
            }
            Ok(self.records.clone())
        }

        fn upsert(&mut self, mut record: Record) -> Result<Record, StoreError> {
            match record.id.clone() {
                Some(id) => {
                    let slot = self
                        .records
                        .iter_mut()
                        .find(|r| r.id.as_deref() == Some(id.as_str()))
                        .ok_or(StoreError::NotFound(id))?;
                    *slot = record.clone();
                }
                None => {
                    record.id = Some(format!("mem-{}", self.records.len() + 1));
                    self.records.insert(0, record.clone());
                }
            }
            Ok(record)
        }

        fn delete(&mut self, id: &str) -> Result<(), StoreError> {
            let before = self.records.len();
            self.records.retain(|r| r.id.as_deref() != Some(id));
            if self.records.len() == before {
                return Err(StoreError::NotFound(id.to_string()));
            }
            Ok(())
        }
    }

    fn test_app() -> App {
        App::with_store(Box::new(MemoryStore::seeded()), Config::default())
    }

    #[test]
    fn test_new_app_loads_collection() {
        let app = test_app();
        assert_eq!(app.records.len(), 5);
        assert_eq!(app.view, View::Dashboard);
        assert!(app.modals.is_empty());
    }

    #[test]
    fn test_search_resets_page_but_mutation_does_not() {
        let mut app = test_app();
        app.query.page_size = 2;
        app.update(Action::NextPage).unwrap();
        assert_eq!(app.query.page, 2);

        // A record mutation keeps the page where it was
        app.update(Action::OpenAddForm).unwrap();
        app.form.draft.full_name = "Novo Registro".to_string();
        app.form.draft.contact_info = "novo@email.com".to_string();
        app.update(Action::SubmitForm).unwrap();
        assert_eq!(app.query.page, 2);
        assert_eq!(app.records.len(), 6);

        // A search change snaps back to page 1
        app.update(Action::SearchInput('a')).unwrap();
        assert_eq!(app.query.page, 1);
    }

    #[test]
    fn test_submit_add_then_edit() {
        let mut app = test_app();
        app.update(Action::OpenAddForm).unwrap();
        assert_eq!(app.modals.top(), Some(&Modal::RecordForm));
        app.form.draft.full_name = "Ana Lima".to_string();
        app.form.draft.contact_info = "ana@email.com".to_string();
        app.update(Action::SubmitForm).unwrap();

        assert!(app.modals.is_empty());
        assert_eq!(app.records.len(), 6);
        let added = app
            .records
            .iter()
            .find(|r| r.full_name == "Ana Lima")
            .unwrap();
        assert!(added.id.is_some());

        let mut edited = added.clone();
        edited.full_name = "Ana de Lima".to_string();
        app.form.open_edit(&edited);
        app.update(Action::SubmitForm).unwrap();
        assert_eq!(app.records.len(), 6);
        assert!(app.records.iter().any(|r| r.full_name == "Ana de Lima"));
    }

    #[test]
    fn test_delete_flow() {
        let mut app = test_app();
        app.view = View::Records;
        app.refresh_views();

        let id = app.records_view.selected_row().unwrap().id.clone().unwrap();
        app.update(Action::OpenDeleteConfirm).unwrap();
        assert!(matches!(
            app.modals.top(),
            Some(Modal::DeleteConfirm { .. })
        ));

        app.update(Action::ConfirmDelete(id.clone())).unwrap();
        assert!(app.modals.is_empty());
        assert_eq!(app.records.len(), 4);
        assert!(!app.records.iter().any(|r| r.id.as_deref() == Some(&id)));
    }

    #[test]
    fn test_delete_missing_record_keeps_collection() {
        let mut app = test_app();
        app.update(Action::ConfirmDelete("nope".to_string())).unwrap();
        assert_eq!(app.records.len(), 5);
        let n = app.notification.as_ref().unwrap();
        assert_eq!(n.kind, NotificationKind::Error);
    }

    #[test]
    fn test_failed_reload_keeps_working_set() {
        let mut app = App::with_store(
            Box::new(MemoryStore {
                records: seed_records(),
                fail_reads: false,
            }),
            Config::default(),
        );
        assert_eq!(app.records.len(), 5);

        app.store = Box::new(MemoryStore {
            records: Vec::new(),
            fail_reads: true,
        });
        app.update(Action::ReloadRecords).unwrap();
        assert_eq!(app.records.len(), 5);
        assert_eq!(
            app.notification.as_ref().unwrap().kind,
            NotificationKind::Error
        );
    }

    #[test]
    fn test_status_filter_modal_applies_selection() {
        let mut app = test_app();
        app.update(Action::OpenStatusFilter).unwrap();
        assert_eq!(app.modals.top(), Some(&Modal::StatusFilter));

        app.update(Action::SetStatusFilter(StatusFilter::Only(
            Status::Authorized,
        )))
        .unwrap();
        assert!(app.modals.is_empty());
        assert_eq!(
            app.query.params.status_filter,
            StatusFilter::Only(Status::Authorized)
        );
        assert_eq!(app.records_view.filtered_total, 1);
    }

    #[test]
    fn test_sort_toggle_flips_order() {
        let mut app = test_app();
        app.update(Action::ToggleSort(SortField::RegistrationDate))
            .unwrap();
        assert_eq!(app.query.params.sort_field, SortField::RegistrationDate);
        app.update(Action::ToggleSort(SortField::RegistrationDate))
            .unwrap();
        assert_eq!(
            app.query.params.sort_order,
            crate::model::SortOrder::Desc
        );
    }

    #[test]
    fn test_cycling_page_size_updates_the_default() {
        let mut app = test_app();
        assert_eq!(app.query.page_size, 10);

        app.update(Action::CyclePageSize).unwrap();
        assert_eq!(app.query.page_size, 20);
        assert_eq!(app.config.default_page_size, 20);
        assert_eq!(app.query.page, 1);
    }

    #[test]
    fn test_notification_expires_on_ticks() {
        let mut app = test_app();
        app.notify(NotificationKind::Info, "hello");
        for _ in 0..NOTIFICATION_TICKS {
            app.update(Action::Tick).unwrap();
        }
        assert!(app.notification.is_none());
    }

    #[test]
    fn test_help_opens_with_scroll_reset() {
        let mut app = test_app();
        app.help_dialog.scroll_offset = 3;
        app.update(Action::OpenHelp).unwrap();
        assert_eq!(app.modals.top(), Some(&Modal::Help));
        assert_eq!(app.help_dialog.scroll_offset, 0);
    }

    #[test]
    fn test_quit_dialog_flow() {
        let mut app = test_app();
        app.update(Action::OpenQuitDialog).unwrap();
        assert_eq!(app.modals.top(), Some(&Modal::QuitConfirm));
        app.update(Action::CloseModal).unwrap();
        assert!(app.modals.is_empty());
        assert!(!app.should_quit);

        app.update(Action::ForceQuit).unwrap();
        assert!(app.should_quit);
    }

    #[test]
    fn test_csv_export_writes_filtered_set() {
        let dir = std::env::temp_dir().join(format!("gestao-export-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let mut app = test_app();
        app.config.export_dir = dir.to_string_lossy().to_string();

        app.update(Action::SearchInput('x')).unwrap();
        app.update(Action::ExportCsv).unwrap();

        let contents = fs::read_to_string(dir.join(CSV_FILE_NAME)).unwrap();
        // Only the header survives a filter nothing matches
        assert_eq!(contents.lines().count(), 1);
        assert_eq!(
            app.notification.as_ref().unwrap().kind,
            NotificationKind::Success
        );
        fs::remove_dir_all(&dir).ok();
    }
}
