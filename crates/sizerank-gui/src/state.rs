/// Application state management.
///
/// Centralises all mutable state that the UI reads and writes. Scan
/// parameters live here and are handed to the core as an explicit
/// [`ScanRequest`]; the scan thread communicates back over a channel that
/// is drained by `process_scan_messages()` once per frame.
use sizerank_core::export::{write_csv, write_json};
use sizerank_core::model::{format_size, ResultSet, SizeUnit};
use sizerank_core::scanner::progress::ScanProgress;
use sizerank_core::scanner::{start_scan, ScanHandle, ScanMode, ScanRequest};
use sizerank_core::ExportError;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

/// The current phase of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppPhase {
    /// Idle -- no scan in progress and no results yet.
    Idle,
    /// Scanning -- progress is shown in the status bar.
    Scanning,
    /// Scan complete -- results are available.
    Results,
}

/// Output format for the export buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

/// Maximum number of scan-progress messages drained from the channel per frame.
///
/// Prevents a backlog (e.g. after the window was hidden) from blocking the
/// render thread for a perceptible duration when it is eventually shown again.
const MAX_MESSAGES_PER_FRAME: usize = 300;

/// All application state.
pub struct AppState {
    // ── Scan parameters ────────────────────────────────
    /// Folder to scan, as typed by the user.
    pub root_input: String,
    pub mode: ScanMode,
    /// Display unit. Changing it never triggers a rescan.
    pub unit: SizeUnit,

    // ── Scan ───────────────────────────────────────────
    pub phase: AppPhase,
    pub scan_handle: Option<ScanHandle>,
    pub scan_current_path: String,
    pub scan_dirs_visited: u64,
    pub scan_duration: Option<Duration>,

    // ── Results ────────────────────────────────────────
    pub results: Option<ResultSet>,
    /// Mode the current results were produced with.
    pub results_mode: ScanMode,
    /// Selected row index into `results`.
    pub selected: Option<usize>,

    // ── UI state ───────────────────────────────────────
    /// Non-fatal message shown in a dismissible dialog.
    pub notice: Option<String>,
    pub show_about: bool,
    /// `true` = dark mode (default), `false` = light mode.
    pub dark_mode: bool,
}

impl AppState {
    /// Create initial application state with `root` pre-filled.
    pub fn new(root: PathBuf) -> Self {
        Self {
            root_input: root.to_string_lossy().into_owned(),
            mode: ScanMode::default(),
            unit: SizeUnit::default(),
            phase: AppPhase::Idle,
            scan_handle: None,
            scan_current_path: String::new(),
            scan_dirs_visited: 0,
            scan_duration: None,
            results: None,
            results_mode: ScanMode::default(),
            selected: None,
            notice: None,
            show_about: false,
            dark_mode: true,
        }
    }

    /// Whether the scan button should be enabled.
    pub fn can_scan(&self) -> bool {
        self.phase != AppPhase::Scanning && !self.root_input.trim().is_empty()
    }

    /// Start a scan of `root_input` in the selected mode.
    ///
    /// Returns `false` without doing anything while another scan is running.
    pub fn start_scan(&mut self) -> bool {
        if !self.can_scan() {
            return false;
        }
        let root = PathBuf::from(self.root_input.trim());

        self.phase = AppPhase::Scanning;
        self.scan_current_path = root.to_string_lossy().into_owned();
        self.scan_dirs_visited = 0;
        self.scan_duration = None;
        self.results = None;
        self.results_mode = self.mode;
        self.selected = None;
        self.notice = None;

        self.scan_handle = Some(start_scan(ScanRequest::new(root, self.mode)));
        true
    }

    /// Process pending scan progress messages. Called once per frame.
    ///
    /// Returns `true` if the UI should repaint (new data arrived).
    pub fn process_scan_messages(&mut self) -> bool {
        let handle = match &self.scan_handle {
            Some(h) => h,
            None => return false,
        };

        let mut repaint = false;
        let mut messages_this_frame = 0usize;
        while messages_this_frame < MAX_MESSAGES_PER_FRAME {
            let msg = match handle.progress_rx.try_recv() {
                Ok(m) => m,
                Err(crossbeam_channel::TryRecvError::Empty) => break,
                Err(crossbeam_channel::TryRecvError::Disconnected) => {
                    warn!("Scanner channel closed without a result");
                    self.finish_with_notice("The scan stopped unexpectedly.".to_string());
                    return true;
                }
            };
            messages_this_frame += 1;
            repaint = true;
            match msg {
                ScanProgress::Visiting { path, dirs_visited } => {
                    self.scan_current_path = path.to_string_lossy().into_owned();
                    self.scan_dirs_visited = dirs_visited;
                }
                ScanProgress::Complete { results, duration } => {
                    info!(
                        "Scan finished with {} entries in {:?}",
                        results.len(),
                        duration
                    );
                    self.scan_duration = Some(duration);
                    self.results = Some(results);
                    self.phase = AppPhase::Results;
                    self.scan_handle = None;
                    return true;
                }
                ScanProgress::Failed { error } => {
                    self.finish_with_notice(error.to_string());
                    return true;
                }
            }
        }
        repaint
    }

    fn finish_with_notice(&mut self, message: String) {
        self.notice = Some(message);
        self.phase = AppPhase::Idle;
        self.scan_handle = None;
    }

    /// Size of `bytes` in the current display unit.
    pub fn formatted_size(&self, bytes: u64) -> String {
        format_size(bytes, self.unit)
    }

    /// Reveal the result at `index` in the host file browser.
    ///
    /// Failures become a notice; they never affect scan state.
    pub fn reveal(&mut self, index: usize) {
        let Some(entry) = self.results.as_ref().and_then(|r| r.entries().get(index)) else {
            return;
        };
        if let Err(err) = sizerank_core::reveal_in_file_browser(&entry.path) {
            warn!("Reveal failed: {err}");
            self.notice = Some(format!("Could not open the folder:\n{err}"));
        }
    }

    /// Write the current results into `dir` as `sizerank-<timestamp>.<ext>`.
    pub fn export_to_dir(&self, dir: &Path, format: ExportFormat) -> Result<PathBuf, ExportError> {
        let Some(results) = self.results.as_ref() else {
            return Err(ExportError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "no scan results to export",
            )));
        };
        let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
        let path = dir.join(format!("sizerank-{stamp}.{}", format.extension()));
        let writer = BufWriter::new(File::create(&path)?);
        match format {
            ExportFormat::Csv => write_csv(results, self.unit, writer)?,
            ExportFormat::Json => write_json(results, writer)?,
        }
        info!("Exported results to {}", path.display());
        Ok(path)
    }

    /// Export into the working directory and report the outcome as a notice.
    pub fn export(&mut self, format: ExportFormat) {
        let dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        self.notice = Some(match self.export_to_dir(&dir, format) {
            Ok(path) => format!("Results saved to {}", path.display()),
            Err(err) => {
                warn!("Export failed: {err}");
                format!("Export failed:\n{err}")
            }
        });
    }
}
