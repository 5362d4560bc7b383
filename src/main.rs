//! `Folio` - terminal front-end for the portfolio page state core
//!
//! Reads one command per line from stdin, forwards it to the page controller
//! and prints what the view would render.

use anyhow::{Context, Result, anyhow, bail};
use folio::{
    config::{ConfigManager, FilePreferenceStore},
    controller::{PageController, PageEvent, PageSnapshot, ScrollRequest},
    error::get_user_friendly_error,
    forms::{Field, PhotoFile},
    portfolio::{Catalog, Tab},
    submission::backend_from_config,
    theme::ColorScheme,
    tracker::{Section, VisibilityEntry},
    utils,
};
use parking_lot::Mutex;
use std::io::{BufRead, Write};
use std::sync::{Arc, mpsc};
use tracing::{error, info, warn};

/// Environment variable standing in for the system color-scheme query
const COLOR_SCHEME_ENV: &str = "FOLIO_COLOR_SCHEME";

/// Optional catalog file in the data directory
const CATALOG_FILE_NAME: &str = "catalog.json";

/// Capacity of the snapshot channel to the printer thread
const SNAPSHOT_CHANNEL_CAPACITY: usize = 32;

const HELP: &str = "\
commands:
  theme                         toggle dark/light
  tab <certificates|projects|tech stack>
  visible <section> <ratio>     report a visibility observation
  scroll <y>                    report the scroll offset
  menu                          toggle the mobile menu
  goto <section>                follow a navigation link
  top                           scroll to top
  contact name|email|message <text>
  comment name|message <text>
  photo <path>                  attach a photo to the comment form
  send                          submit the contact form
  post                          submit the comment form
  comments                      list comments
  gallery                       list cards in the active tab
  show                          print the current state
  quit";

/// Main entry point for the application
fn main() -> Result<()> {
    utils::init_logging().context("Failed to initialize logging system")?;

    let config = ConfigManager::load_or_init().context("Failed to load configuration")?;
    let data_dir = ConfigManager::data_dir();
    let store = Arc::new(FilePreferenceStore::in_dir(&data_dir));
    let backend = backend_from_config(&config).context("Failed to create submission backend")?;

    let system_scheme = std::env::var(COLOR_SCHEME_ENV)
        .ok()
        .and_then(|value| match value.trim().to_ascii_lowercase().as_str() {
            "dark" => Some(ColorScheme::Dark),
            "light" => Some(ColorScheme::Light),
            _ => None,
        });

    let (snapshot_tx, snapshot_rx) = mpsc::sync_channel(SNAPSHOT_CHANNEL_CAPACITY);
    let mut controller = PageController::new(config, store, system_scheme, backend, snapshot_tx);

    let catalog_path = data_dir.join(CATALOG_FILE_NAME);
    if catalog_path.exists() {
        match Catalog::load_from(&catalog_path) {
            Ok(catalog) => controller = controller.with_catalog(catalog),
            Err(e) => warn!("Ignoring unreadable catalog {}: {}", catalog_path.display(), e),
        }
    }

    let events = controller.event_sender();
    controller.start();

    let controller = Arc::new(Mutex::new(controller));
    let event_loop = PageController::spawn_event_loop(Arc::clone(&controller));
    let printer = spawn_printer(snapshot_rx);

    println!("Folio v{} - type `help` for commands", env!("CARGO_PKG_VERSION"));

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("Failed to read from stdin")?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "quit" || line == "exit" {
            break;
        }
        if let Err(e) = execute(line, &controller, &events) {
            println!("! {e:#}");
        }
    }

    info!("Shutting down");
    let _ = events.send(PageEvent::Shutdown);
    if event_loop.join().is_err() {
        error!("Event loop thread panicked");
    }
    drop(controller);
    let _ = printer.join();
    Ok(())
}

/// Apply one command line
fn execute(line: &str, controller: &Mutex<PageController>, events: &mpsc::Sender<PageEvent>) -> Result<()> {
    let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
    let rest = rest.trim();

    match command {
        "help" => println!("{HELP}"),
        "theme" => {
            let theme = controller.lock().toggle_theme();
            println!("theme: {theme}");
        }
        "tab" => {
            let tab: Tab = rest.parse().map_err(anyhow::Error::msg)?;
            controller.lock().select_tab(tab);
        }
        "visible" => {
            let (section, ratio) = rest
                .split_once(' ')
                .context("usage: visible <section> <ratio>")?;
            let section: Section = section.parse().map_err(anyhow::Error::msg)?;
            let ratio: f64 = ratio.trim().parse().context("ratio must be a number")?;
            events
                .send(PageEvent::Visibility(vec![VisibilityEntry { section, ratio }]))
                .map_err(|_| anyhow!("page controller stopped"))?;
        }
        "scroll" => {
            let y: f64 = rest.parse().context("usage: scroll <y>")?;
            events
                .send(PageEvent::Scrolled(y))
                .map_err(|_| anyhow!("page controller stopped"))?;
        }
        "menu" => {
            let open = controller.lock().toggle_menu();
            println!("menu: {}", if open { "open" } else { "closed" });
        }
        "goto" => {
            let section: Section = rest.parse().map_err(anyhow::Error::msg)?;
            controller.lock().navigate(section);
        }
        "top" => controller.lock().scroll_to_top(),
        "contact" | "comment" => {
            let (field, value) = rest.split_once(' ').unwrap_or((rest, ""));
            let field = match field {
                "name" => Field::Name,
                "email" if command == "contact" => Field::Email,
                "message" => Field::Message,
                other => bail!("unknown {command} field: {other}"),
            };
            let mut guard = controller.lock();
            if command == "contact" {
                guard.set_contact_field(field, value);
            } else {
                guard.set_comment_field(field, value);
            }
        }
        "photo" => {
            let file = PhotoFile::from_path(rest)
                .with_context(|| format!("Failed to open photo {rest}"))?;
            if !controller.lock().upload_photo(file) {
                print_errors(&controller.lock().snapshot());
            }
        }
        "send" | "post" => {
            let mut guard = controller.lock();
            let started = if command == "send" {
                guard.submit_contact()
            } else {
                guard.submit_comment()
            };
            match started {
                Ok(true) => println!("sending..."),
                Ok(false) => print_errors(&guard.snapshot()),
                Err(e) => println!("! {}", get_user_friendly_error(&e)),
            }
        }
        "comments" => {
            let snapshot = controller.lock().snapshot();
            let now = chrono::Utc::now();
            println!("{}", snapshot.comments.heading());
            for comment in &snapshot.comments {
                let pin = if comment.pinned { " [pinned]" } else { "" };
                let role = comment.role.as_deref().map(|r| format!(" ({r})")).unwrap_or_default();
                println!(
                    "  {}{}{} - {}",
                    comment.name,
                    role,
                    pin,
                    comment.relative_label(now)
                );
                println!("    {}", comment.render_message());
            }
        }
        "gallery" => {
            let guard = controller.lock();
            let tab = guard.snapshot().active_tab;
            println!("{tab}:");
            for item in guard.catalog().items(tab) {
                match item.action() {
                    Some((label, href)) => println!("  {} [{label}: {href}]", item.title()),
                    None => println!("  {}", item.title()),
                }
            }
        }
        "show" => print_state(&controller.lock().snapshot()),
        other => bail!("unknown command: {other} (try `help`)"),
    }
    Ok(())
}

/// Print changes the user should notice as snapshots arrive
fn spawn_printer(receiver: mpsc::Receiver<PageSnapshot>) -> std::thread::JoinHandle<()> {
    std::thread::spawn(move || {
        let mut last_notification = None;
        let mut last_section = None;
        let mut loaded = false;

        while let Ok(snapshot) = receiver.recv() {
            if snapshot.notification != last_notification {
                if let Some(n) = &snapshot.notification {
                    println!("[{:?}] {}", n.kind, n.message);
                }
                last_notification = snapshot.notification.clone();
            }
            if last_section != Some(snapshot.active_section) {
                println!("section: {}", snapshot.active_section);
                last_section = Some(snapshot.active_section);
            }
            if snapshot.loaded && !loaded {
                println!("hero loaded");
                loaded = true;
            }
            match snapshot.scroll_request {
                Some(ScrollRequest::Top) => println!("scrolling to top"),
                Some(ScrollRequest::Section(section)) => println!("scrolling to #{}", section.id()),
                None => {}
            }
            let _ = std::io::stdout().flush();
        }
    })
}

fn print_errors(snapshot: &PageSnapshot) {
    for (field, message) in snapshot.contact_errors.iter().chain(snapshot.comment_errors.iter()) {
        println!("  {field}: {message}");
    }
}

fn print_state(snapshot: &PageSnapshot) {
    println!("theme: {} ({})", snapshot.theme, snapshot.style.to_css());
    let nav: Vec<String> = snapshot
        .nav_links
        .iter()
        .map(|link| {
            if link.is_active {
                format!("[{}]", link.label)
            } else {
                link.label.to_string()
            }
        })
        .collect();
    println!("nav: {}", nav.join(" "));
    println!(
        "menu: {}  scroll-top button: {}  loaded: {}",
        snapshot.menu_open, snapshot.show_scroll_top, snapshot.loaded
    );
    println!("tab: {}", snapshot.active_tab);
    println!(
        "contact: name={:?} email={:?} message={:?}",
        snapshot.contact.name, snapshot.contact.email, snapshot.contact.message
    );
    println!(
        "comment: name={:?} message={:?} photo={}",
        snapshot.comment.name,
        snapshot.comment.message,
        snapshot.comment.photo.as_ref().map_or("none", |p| p.mime_type())
    );
    print_errors(snapshot);
    if let Some(kind) = snapshot.submitting {
        println!("submitting: {kind}");
    }
    if let Some(n) = &snapshot.notification {
        println!("notification: {}", n.message);
    }
}
