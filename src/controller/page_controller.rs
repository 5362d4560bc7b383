//! Page controller implementation
//!
//! This module implements the single state container for the page and the
//! event loop that applies observations and completed background work.

use crate::config::{FolioConfig, PreferenceStore};
use crate::error::Result;
use crate::forms::{
    CommentForm, CommentList, ContactForm, Field, FormController, FormKind, NotificationKind,
    Outcome, PhotoFile, ValidationErrors,
};
use crate::portfolio::{Catalog, Tab};
use crate::submission::{Ack, SubmissionBackend};
use crate::theme::{ColorScheme, StyleSheet, Theme, ThemeManager};
use crate::tracker::{NavLink, Section, SectionTracker, VisibilityEntry};
use chrono::Utc;
use parking_lot::Mutex;
use std::sync::mpsc::{self, RecvTimeoutError, TryRecvError, TrySendError};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Input delivered to the controller's event loop
#[derive(Debug)]
pub enum PageEvent {
    /// Visibility observations, in the order the observer reported them
    Visibility(Vec<VisibilityEntry>),
    /// Vertical scroll offset changed
    Scrolled(f64),
    /// A backend call for `kind` finished
    SubmissionCompleted {
        /// Form that was submitted
        kind: FormKind,
        /// Backend answer
        result: Result<Ack>,
    },
    /// A photo finished encoding
    PhotoDecoded {
        /// Upload generation the result belongs to
        generation: u64,
        /// Encoded photo or the read failure
        result: Result<crate::forms::Photo>,
    },
    /// The notification with this id reached its display timeout
    NotificationExpired(u64),
    /// The hero skeleton delay elapsed
    Loaded,
    /// Stop the event loop
    Shutdown,
}

/// Transient toast shown after a submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Identifier used to match the expiry timer
    pub id: u64,
    /// Severity
    pub kind: NotificationKind,
    /// Text
    pub message: String,
}

/// One-shot scroll instruction for the view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollRequest {
    /// Scroll to the top of the page
    Top,
    /// Scroll to a section anchor
    Section(Section),
}

/// Everything the view needs to render, sent after each state change
#[derive(Debug, Clone)]
pub struct PageSnapshot {
    /// Active theme
    pub theme: Theme,
    /// Root class and style variables for the theme
    pub style: StyleSheet,
    /// Region currently in view
    pub active_section: Section,
    /// Navigation links with highlight state
    pub nav_links: Vec<NavLink>,
    /// Whether the scroll-to-top button shows
    pub show_scroll_top: bool,
    /// Whether the mobile menu is open
    pub menu_open: bool,
    /// Whether the hero image replaced its skeleton
    pub loaded: bool,
    /// Selected gallery tab
    pub active_tab: Tab,
    /// Contact form values
    pub contact: ContactForm,
    /// Contact form errors
    pub contact_errors: ValidationErrors,
    /// Comment form values
    pub comment: CommentForm,
    /// Comment form errors
    pub comment_errors: ValidationErrors,
    /// Comments, newest first
    pub comments: CommentList,
    /// Form with a submission in flight
    pub submitting: Option<FormKind>,
    /// Visible notification
    pub notification: Option<Notification>,
    /// Pending scroll instruction, delivered once
    pub scroll_request: Option<ScrollRequest>,
}

/// Single owner of all page state
pub struct PageController {
    config: FolioConfig,
    theme: ThemeManager,
    tracker: SectionTracker,
    forms: FormController,
    catalog: Catalog,
    active_tab: Tab,
    menu_open: bool,
    loaded: bool,
    notification: Option<Notification>,
    next_notification_id: u64,
    scroll_request: Option<ScrollRequest>,
    backend: Arc<dyn SubmissionBackend>,
    /// Sender handed to background workers
    event_sender: mpsc::Sender<PageEvent>,
    /// Event receiver (taken when the event loop starts)
    event_receiver: Option<mpsc::Receiver<PageEvent>>,
    /// Snapshot sender to the view
    snapshot_sender: mpsc::SyncSender<PageSnapshot>,
}

impl PageController {
    /// Create a controller with the built-in catalog and seeded comments
    pub fn new(
        config: FolioConfig,
        store: Arc<dyn PreferenceStore>,
        system_scheme: Option<ColorScheme>,
        backend: Arc<dyn SubmissionBackend>,
        snapshot_sender: mpsc::SyncSender<PageSnapshot>,
    ) -> Self {
        let (event_sender, event_receiver) = mpsc::channel();
        let theme = ThemeManager::new(store, system_scheme);
        let tracker = SectionTracker::new(config.tracker.clone());
        let forms = FormController::new(CommentList::seeded(), config.uploads.max_photo_bytes);

        Self {
            config,
            theme,
            tracker,
            forms,
            catalog: Catalog::default(),
            active_tab: Tab::default(),
            menu_open: false,
            loaded: false,
            notification: None,
            next_notification_id: 1,
            scroll_request: None,
            backend,
            event_sender,
            event_receiver: Some(event_receiver),
            snapshot_sender,
        }
    }

    /// Replace the built-in catalog
    #[must_use]
    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Sender for external notifiers (visibility observer, scroll listener)
    pub fn event_sender(&self) -> mpsc::Sender<PageEvent> {
        self.event_sender.clone()
    }

    /// Gallery content
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Form state
    pub fn forms(&self) -> &FormController {
        &self.forms
    }

    /// Active theme
    pub fn theme(&self) -> Theme {
        self.theme.current()
    }

    /// Region currently in view
    pub fn active_section(&self) -> Section {
        self.tracker.active_section()
    }

    /// Visible notification
    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    /// Schedule the loading flag and publish the first snapshot
    pub fn start(&mut self) {
        info!("Starting page controller");
        let delay = Duration::from_millis(self.config.timings.loading_ms);
        self.post_after(delay, PageEvent::Loaded);
        self.send_snapshot();
    }

    /// Switch between dark and light
    pub fn toggle_theme(&mut self) -> Theme {
        let theme = self.theme.toggle();
        info!("Theme toggled to {}", theme);
        self.send_snapshot();
        theme
    }

    /// Select a gallery tab
    pub fn select_tab(&mut self, tab: Tab) {
        debug!("Gallery tab: {} -> {}", self.active_tab, tab);
        self.active_tab = tab;
        self.send_snapshot();
    }

    /// Open or close the mobile menu
    pub fn toggle_menu(&mut self) -> bool {
        self.menu_open = !self.menu_open;
        self.send_snapshot();
        self.menu_open
    }

    /// Follow a navigation link: close the menu and request a scroll
    pub fn navigate(&mut self, section: Section) {
        self.menu_open = false;
        self.scroll_request = Some(ScrollRequest::Section(section));
        self.send_snapshot();
    }

    /// Request a scroll back to the top
    pub fn scroll_to_top(&mut self) {
        self.scroll_request = Some(ScrollRequest::Top);
        self.send_snapshot();
    }

    /// Update a contact form field
    pub fn set_contact_field(&mut self, field: Field, value: impl Into<String>) {
        self.forms.set_contact_field(field, value);
        self.send_snapshot();
    }

    /// Update a comment form text field
    pub fn set_comment_field(&mut self, field: Field, value: impl Into<String>) {
        self.forms.set_comment_field(field, value);
        self.send_snapshot();
    }

    /// Validate and submit the contact form
    pub fn submit_contact(&mut self) -> Result<bool> {
        self.submit(FormKind::Contact)
    }

    /// Validate and submit the comment form
    pub fn submit_comment(&mut self) -> Result<bool> {
        self.submit(FormKind::Comment)
    }

    /// Validate `kind` and hand a valid payload to the backend on a worker thread
    ///
    /// Returns `Ok(true)` when a submission started and `Ok(false)` when
    /// validation failed.
    fn submit(&mut self, kind: FormKind) -> Result<bool> {
        let payload = self.forms.begin_submit(kind)?;
        let started = payload.is_some();

        if let Some(payload) = payload {
            let backend = Arc::clone(&self.backend);
            let sender = self.event_sender.clone();
            std::thread::spawn(move || {
                let result = backend.submit(&payload);
                if sender
                    .send(PageEvent::SubmissionCompleted { kind, result })
                    .is_err()
                {
                    debug!("Page closed before {} submission completed", kind);
                }
            });
        }

        self.send_snapshot();
        Ok(started)
    }

    /// Check a picked photo and decode it on a worker thread
    ///
    /// Returns `false` if the file was rejected for its size.
    pub fn upload_photo(&mut self, file: PhotoFile) -> bool {
        let ticket = self.forms.begin_photo_upload(file);
        let accepted = ticket.is_some();

        if let Some(ticket) = ticket {
            let sender = self.event_sender.clone();
            std::thread::spawn(move || {
                let result = ticket.decode();
                let _ = sender.send(PageEvent::PhotoDecoded {
                    generation: ticket.generation,
                    result,
                });
            });
        }

        self.send_snapshot();
        accepted
    }

    /// Apply one event and publish the resulting state
    pub fn handle_event(&mut self, event: PageEvent) {
        match event {
            PageEvent::Visibility(entries) => {
                if !self.tracker.observe(&entries) {
                    return;
                }
            }
            PageEvent::Scrolled(y) => {
                if !self.tracker.on_scroll(y) {
                    return;
                }
            }
            PageEvent::SubmissionCompleted { kind, result } => {
                let outcome = self.forms.finish_submit(kind, &result, Utc::now());
                self.show_notification(outcome);
            }
            PageEvent::PhotoDecoded { generation, result } => {
                if !self.forms.finish_photo_upload(generation, result) {
                    return;
                }
            }
            PageEvent::NotificationExpired(id) => {
                if self.notification.as_ref().map(|n| n.id) != Some(id) {
                    debug!("Notification {} already replaced", id);
                    return;
                }
                self.notification = None;
            }
            PageEvent::Loaded => {
                self.loaded = true;
            }
            PageEvent::Shutdown => return,
        }
        self.send_snapshot();
    }

    /// Wait up to `timeout` for one event and apply it
    ///
    /// Returns `false` on timeout or once the event loop owns the receiver.
    pub fn process_next(&mut self, timeout: Duration) -> bool {
        let Some(receiver) = self.event_receiver.take() else {
            return false;
        };
        let outcome = receiver.recv_timeout(timeout);
        self.event_receiver = Some(receiver);

        match outcome {
            Ok(event) => {
                self.handle_event(event);
                true
            }
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => false,
        }
    }

    /// Apply every event already queued without blocking
    pub fn pump(&mut self) -> usize {
        let Some(receiver) = self.event_receiver.take() else {
            return 0;
        };
        let mut handled = 0;
        loop {
            match receiver.try_recv() {
                Ok(event) => {
                    self.handle_event(event);
                    handled += 1;
                }
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            }
        }
        self.event_receiver = Some(receiver);
        handled
    }

    /// Run the event loop on the current thread until `Shutdown`
    pub fn run(&mut self) {
        let Some(receiver) = self.event_receiver.take() else {
            warn!("Event loop already running; run() call ignored");
            return;
        };

        info!("Entering page event loop");
        while let Ok(event) = receiver.recv() {
            if matches!(event, PageEvent::Shutdown) {
                break;
            }
            self.handle_event(event);
        }
        info!("Page event loop exited");
    }

    /// Spawn the event loop in a background thread. Only locks the controller
    /// while handling individual events, so view callbacks are not blocked.
    pub fn spawn_event_loop(controller: Arc<Mutex<PageController>>) -> std::thread::JoinHandle<()> {
        let receiver = controller.lock().event_receiver.take();

        std::thread::spawn(move || {
            let Some(receiver) = receiver else {
                warn!("Event loop already running; spawn_event_loop() call ignored");
                return;
            };

            info!("Entering page event loop");
            while let Ok(event) = receiver.recv() {
                if matches!(event, PageEvent::Shutdown) {
                    break;
                }
                controller.lock().handle_event(event);
            }
            info!("Page event loop exited");
        })
    }

    /// Show a toast and schedule its dismissal
    fn show_notification(&mut self, outcome: Outcome) {
        let id = self.next_notification_id;
        self.next_notification_id += 1;

        info!("Notification {}: {}", id, outcome.message);
        self.notification = Some(Notification {
            id,
            kind: outcome.kind,
            message: outcome.message.to_string(),
        });

        let ttl = Duration::from_millis(self.config.timings.notification_ms);
        self.post_after(ttl, PageEvent::NotificationExpired(id));
    }

    /// Deliver `event` to this controller after `delay`
    fn post_after(&self, delay: Duration, event: PageEvent) {
        let sender = self.event_sender.clone();
        std::thread::spawn(move || {
            std::thread::sleep(delay);
            let _ = sender.send(event);
        });
    }

    /// Current state for the view
    pub fn snapshot(&self) -> PageSnapshot {
        PageSnapshot {
            theme: self.theme.current(),
            style: self.theme.style_sheet().clone(),
            active_section: self.tracker.active_section(),
            nav_links: self.tracker.nav_links(),
            show_scroll_top: self.tracker.show_scroll_top(),
            menu_open: self.menu_open,
            loaded: self.loaded,
            active_tab: self.active_tab,
            contact: self.forms.contact().clone(),
            contact_errors: self.forms.contact_errors().clone(),
            comment: self.forms.comment().clone(),
            comment_errors: self.forms.comment_errors().clone(),
            comments: self.forms.comments().clone(),
            submitting: self.forms.submitting(),
            notification: self.notification.clone(),
            scroll_request: self.scroll_request,
        }
    }

    /// Send the current state to the view without blocking
    fn send_snapshot(&mut self) {
        let snapshot = self.snapshot();
        self.scroll_request = None;

        match self.snapshot_sender.try_send(snapshot) {
            Ok(()) => debug!("Snapshot sent to view"),
            Err(TrySendError::Full(_)) => warn!("View is not keeping up; snapshot dropped"),
            Err(TrySendError::Disconnected(_)) => debug!("View disconnected; snapshot dropped"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MemoryPreferenceStore;
    use crate::error::{FolioError, StringError};
    use crate::submission::{SimulatedBackend, Submission};
    use crate::test_utils::tiny_png;

    struct FailingBackend;

    impl SubmissionBackend for FailingBackend {
        fn submit(&self, _payload: &Submission) -> Result<Ack> {
            Err(FolioError::SubmissionFailed(StringError::new("offline")))
        }
    }

    fn fast_config() -> FolioConfig {
        let mut config = FolioConfig::default();
        config.timings.submit_delay_ms = 20;
        config.timings.notification_ms = 100;
        config.timings.loading_ms = 10;
        config
    }

    fn controller_with(
        backend: Arc<dyn SubmissionBackend>,
    ) -> (PageController, mpsc::Receiver<PageSnapshot>) {
        let (tx, rx) = mpsc::sync_channel(256);
        let controller = PageController::new(
            fast_config(),
            Arc::new(MemoryPreferenceStore::new()),
            None,
            backend,
            tx,
        );
        (controller, rx)
    }

    fn controller() -> (PageController, mpsc::Receiver<PageSnapshot>) {
        controller_with(Arc::new(SimulatedBackend::new(Duration::from_millis(20))))
    }

    /// Process events until `done` holds or two seconds pass
    fn wait_until(c: &mut PageController, done: impl Fn(&PageController) -> bool) {
        let deadline = std::time::Instant::now() + Duration::from_secs(2);
        while !done(c) && std::time::Instant::now() < deadline {
            c.process_next(Duration::from_millis(20));
        }
        assert!(done(c), "condition not reached before deadline");
    }

    #[test]
    fn test_start_sends_initial_snapshot_then_loads() {
        let (mut c, rx) = controller();
        c.start();
        let first = rx.try_recv().unwrap();
        assert!(!first.loaded);
        assert_eq!(first.active_section, Section::Home);
        assert_eq!(first.active_tab, Tab::Projects);
        assert_eq!(first.comments.len(), 3);

        wait_until(&mut c, |c| c.snapshot().loaded);
    }

    #[test]
    fn test_invalid_contact_shows_errors_only() {
        let (mut c, _rx) = controller();
        c.set_contact_field(Field::Email, "x");
        c.set_contact_field(Field::Message, "hi");

        assert!(!c.submit_contact().unwrap());
        let snapshot = c.snapshot();
        assert_eq!(snapshot.contact_errors.len(), 2);
        assert_eq!(snapshot.contact.email, "x");
        assert!(snapshot.submitting.is_none());
        assert!(snapshot.notification.is_none());
    }

    #[test]
    fn test_contact_round_trip_with_notification_expiry() {
        let (mut c, _rx) = controller();
        c.set_contact_field(Field::Name, "Jo");
        c.set_contact_field(Field::Email, "jo@x.com");
        c.set_contact_field(Field::Message, "hello");

        assert!(c.submit_contact().unwrap());
        assert_eq!(c.snapshot().submitting, Some(FormKind::Contact));
        assert!(matches!(
            c.submit_contact(),
            Err(FolioError::SubmissionInProgress)
        ));

        wait_until(&mut c, |c| c.notification().is_some());
        let snapshot = c.snapshot();
        assert_eq!(snapshot.contact, ContactForm::default());
        assert!(snapshot.submitting.is_none());
        let notification = snapshot.notification.unwrap();
        assert_eq!(notification.kind, NotificationKind::Success);
        assert_eq!(notification.message, "Message sent successfully!");

        wait_until(&mut c, |c| c.notification().is_none());
    }

    #[test]
    fn test_failed_submission_keeps_values() {
        let (mut c, _rx) = controller_with(Arc::new(FailingBackend));
        c.set_comment_field(Field::Name, "Ann");
        c.set_comment_field(Field::Message, "hi");
        assert!(c.submit_comment().unwrap());

        wait_until(&mut c, |c| c.notification().is_some());
        let snapshot = c.snapshot();
        assert_eq!(snapshot.notification.unwrap().kind, NotificationKind::Error);
        assert_eq!(snapshot.comment.name, "Ann");
        assert_eq!(snapshot.comments.len(), 3);
        assert!(snapshot.submitting.is_none());
    }

    #[test]
    fn test_stale_expiry_does_not_dismiss_newer_notification() {
        let (mut c, _rx) = controller();
        c.show_notification(Outcome {
            kind: NotificationKind::Success,
            message: "first",
        });
        c.show_notification(Outcome {
            kind: NotificationKind::Success,
            message: "second",
        });
        c.handle_event(PageEvent::NotificationExpired(1));
        assert_eq!(c.notification().unwrap().message, "second");
        c.handle_event(PageEvent::NotificationExpired(2));
        assert!(c.notification().is_none());
    }

    #[test]
    fn test_photo_upload_and_comment_post() {
        let (mut c, _rx) = controller();
        assert!(c.upload_photo(PhotoFile::from_bytes("me.png", tiny_png())));
        wait_until(&mut c, |c| c.forms().comment().photo.is_some());

        c.set_comment_field(Field::Name, "Ann");
        c.set_comment_field(Field::Message, "great");
        assert!(c.submit_comment().unwrap());
        wait_until(&mut c, |c| c.forms().comments().len() == 4);

        let snapshot = c.snapshot();
        assert_eq!(snapshot.comments.get(0).unwrap().name, "Ann");
        assert!(snapshot.comment.photo.is_none());
    }

    #[test]
    fn test_oversized_photo_rejected() {
        let (mut c, _rx) = controller();
        let big = PhotoFile::from_bytes("big.png", vec![0; 5 * 1024 * 1024 + 1]);
        assert!(!c.upload_photo(big));
        assert_eq!(
            c.snapshot().comment_errors.get(Field::Photo),
            Some("File size exceeds 5MB")
        );
    }

    #[test]
    fn test_visibility_and_scroll_events() {
        let (mut c, _rx) = controller();
        let sender = c.event_sender();
        sender
            .send(PageEvent::Visibility(vec![
                VisibilityEntry {
                    section: Section::Home,
                    ratio: 0.2,
                },
                VisibilityEntry {
                    section: Section::About,
                    ratio: 0.5,
                },
            ]))
            .unwrap();
        sender.send(PageEvent::Scrolled(450.0)).unwrap();
        assert_eq!(c.pump(), 2);

        let snapshot = c.snapshot();
        assert_eq!(snapshot.active_section, Section::About);
        assert!(snapshot.show_scroll_top);
        assert!(snapshot.nav_links[1].is_active);
    }

    #[test]
    fn test_theme_tab_and_menu() {
        let (mut c, rx) = controller();
        assert_eq!(c.theme(), Theme::Dark);
        assert_eq!(c.toggle_theme(), Theme::Light);
        let snapshot = rx.try_recv().unwrap();
        assert_eq!(snapshot.style.root_class, Some("light"));

        c.select_tab(Tab::TechStack);
        assert!(c.toggle_menu());
        c.navigate(Section::Contact);

        // Drain the tab and menu snapshots
        let _ = rx.try_recv().unwrap();
        let _ = rx.try_recv().unwrap();
        let nav = rx.try_recv().unwrap();
        assert!(!nav.menu_open);
        assert_eq!(nav.active_tab, Tab::TechStack);
        assert_eq!(
            nav.scroll_request,
            Some(ScrollRequest::Section(Section::Contact))
        );
        // Scroll requests are delivered once
        assert!(c.snapshot().scroll_request.is_none());
    }

    #[test]
    fn test_spawned_event_loop_stops_on_shutdown() {
        let (c, _rx) = controller();
        let sender = c.event_sender();
        let controller = Arc::new(Mutex::new(c));
        let handle = PageController::spawn_event_loop(Arc::clone(&controller));

        sender.send(PageEvent::Scrolled(1000.0)).unwrap();
        sender.send(PageEvent::Shutdown).unwrap();
        handle.join().unwrap();

        let guard = controller.lock();
        assert!(guard.snapshot().show_scroll_top);
        // Receiver is owned by the finished loop
        drop(guard);
        assert!(!controller.lock().process_next(Duration::from_millis(1)));
    }
}
