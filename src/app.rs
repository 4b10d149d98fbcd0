//! Main application state and UI

use eframe::egui;
use std::path::PathBuf;

use crate::data::{Explanation, ExplorerContext, ImageAsset, FEATURES_FILES, SEQUENCES_FILE};

/// Application state
pub struct ExplorerApp {
    /// Base directory holding data/ and images/
    base_dir: PathBuf,

    /// Read-only session data, absent when the startup load failed
    context: Option<ExplorerContext>,
    load_error: Option<String>,

    // Explore tab state
    selected_id: Option<String>,
    explanation: Option<Explanation>,

    // View state
    current_tab: Tab,

    // Save/export
    save_error: Option<String>,
    export_error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Overview,
    Database,
    Explore,
    About,
}

impl ExplorerApp {
    pub fn new(cc: &eframe::CreationContext<'_>, base_dir: PathBuf) -> Self {
        egui_extras::install_image_loaders(&cc.egui_ctx);
        let mut app = Self {
            base_dir,
            context: None,
            load_error: None,
            selected_id: None,
            explanation: None,
            current_tab: Tab::Overview,
            save_error: None,
            export_error: None,
        };
        app.load_data();
        app
    }

    /// One-time load of the features CSV, protein FASTA and figure paths.
    /// Also re-run by File > Reload Data.
    fn load_data(&mut self) {
        self.context = None;
        self.load_error = None;
        self.selected_id = None;
        self.explanation = None;

        match ExplorerContext::load(&self.base_dir) {
            Ok(context) => {
                self.selected_id = context.table.records.first().map(|r| r.id.clone());
                self.context = Some(context);
            }
            Err(e) => {
                self.load_error = Some(e);
            }
        }
    }

    fn run_explain(&mut self) {
        let (Some(context), Some(id)) = (&self.context, &self.selected_id) else {
            return;
        };
        self.explanation = Some(context.explain(id));
    }

    fn save_summary(&mut self) {
        let Some(explanation) = &self.explanation else {
            self.save_error = Some("No summary to save. Explain a sequence first.".to_string());
            return;
        };

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Text", &["txt"])
            .set_file_name("sequence_summary.txt")
            .save_file()
        {
            let mut text = explanation.summary.clone();
            text.push('\n');
            match std::fs::write(&path, text) {
                Ok(()) => self.save_error = None,
                Err(e) => self.save_error = Some(format!("Failed to write file: {}", e)),
            }
        }
    }

    fn export_table_json(&mut self) {
        let Some(context) = &self.context else {
            self.export_error = Some("No feature table loaded".to_string());
            return;
        };

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .set_file_name("tp53_features.json")
            .save_file()
        {
            match serde_json::to_string_pretty(&context.table.records) {
                Ok(json) => {
                    if let Err(e) = std::fs::write(&path, json) {
                        self.export_error = Some(format!("Failed to write file: {}", e));
                    } else {
                        self.export_error = None;
                    }
                }
                Err(e) => {
                    self.export_error = Some(format!("Failed to serialize: {}", e));
                }
            }
        }
    }

    /// Errors to surface in the status bar, in display order. Save and
    /// export run from the File menu on any tab, so their failures are
    /// reported here rather than inside one tab's panel.
    fn status_errors(&self) -> Vec<&str> {
        let mut errors = Vec::new();
        if let Some(e) = &self.load_error {
            errors.push(e.as_str());
        }
        if let Some(e) = &self.save_error {
            errors.push(e.as_str());
        }
        if let Some(e) = &self.export_error {
            errors.push(e.as_str());
        }
        errors
    }
}

impl eframe::App for ExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Reload Data").clicked() {
                        self.load_data();
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Save Summary...").clicked() {
                        self.save_summary();
                        ui.close_menu();
                    }
                    if ui.button("Export Table as JSON...").clicked() {
                        self.export_table_json();
                        ui.close_menu();
                    }
                });
            });
        });

        // Tab bar
        egui::TopBottomPanel::top("tabs").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.selectable_value(&mut self.current_tab, Tab::Overview, "Overview");
                ui.selectable_value(&mut self.current_tab, Tab::Database, "TP53 Database");
                ui.selectable_value(&mut self.current_tab, Tab::Explore, "Explore a Sequence");
                ui.selectable_value(&mut self.current_tab, Tab::About, "About");
            });
        });

        // Status bar
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if self.load_error.is_none() {
                    if let Some(ref context) = self.context {
                        ui.label(format!(
                            "Features: {} records ({}) | Sequences: {} proteins",
                            context.table.len(),
                            context.table.source_file,
                            context.sequences.len()
                        ));
                    } else {
                        ui.label("No data loaded");
                    }
                }
                for error in self.status_errors() {
                    ui.colored_label(egui::Color32::RED, error);
                }
            });
        });

        // Main content
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.context.is_none() {
                self.show_load_error(ui);
                return;
            }
            match self.current_tab {
                Tab::Overview => self.show_overview_tab(ui),
                Tab::Database => self.show_database_tab(ui),
                Tab::Explore => self.show_explore_tab(ui),
                Tab::About => self.show_about_tab(ui),
            }
        });
    }
}

impl ExplorerApp {
    fn show_load_error(&mut self, ui: &mut egui::Ui) {
        ui.heading("TP53 Cancer Resistance Explorer");
        ui.separator();
        if let Some(error) = self.load_error.clone() {
            ui.colored_label(egui::Color32::RED, error);
        }
        ui.add_space(5.0);
        ui.label(format!(
            "Expected files under '{}':",
            self.base_dir.display()
        ));
        ui.monospace(format!("  {}  (preferred)", FEATURES_FILES[0]));
        ui.monospace(format!("  {}", FEATURES_FILES[1]));
        ui.monospace(format!("  {}", SEQUENCES_FILE));
        ui.add_space(10.0);
        if ui.button("Reload Data").clicked() {
            self.load_data();
        }
    }

    fn show_overview_tab(&mut self, ui: &mut egui::Ui) {
        let Some(context) = &self.context else {
            return;
        };
        let assets = context.assets.clone();

        ui.heading("Overview of Analysis");
        ui.separator();
        ui.label(
            "Evolutionary tree, conservation pattern, and overall similarity of \
             elephant TP53-like genes to human TP53.",
        );
        ui.add_space(5.0);

        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.columns(2, |cols| {
                show_figure(
                    &mut cols[0],
                    "Phylogenetic Tree",
                    &assets.tree,
                    "Figure 1. Phylogenetic tree of TP53 and retrogenes.",
                );
                show_figure(
                    &mut cols[1],
                    "MSA Conservation Logo",
                    &assets.logo,
                    "Figure 2. TP53 multiple sequence alignment logo.",
                );
            });

            ui.add_space(10.0);
            ui.separator();
            show_figure(
                ui,
                "Identity to Human TP53",
                &assets.barplot,
                "Figure 3. Top TP53/RTG sequences by % identity to human TP53.",
            );
        });
    }

    fn show_database_tab(&mut self, ui: &mut egui::Ui) {
        let Some(context) = &self.context else {
            return;
        };

        ui.heading("TP53 Feature Table");
        ui.separator();
        ui.label(
            "All TP53 and TP53-like sequences used in the analysis, with length, \
             composition features, and similarity to human TP53. Sorted by identity, \
             highest first.",
        );
        ui.add_space(5.0);

        let order = context.table.indices_by_identity_desc();
        let show_cluster = context.table.has_cluster;

        egui::ScrollArea::vertical().show(ui, |ui| {
            egui::Grid::new("feature_table")
                .striped(true)
                .min_col_width(90.0)
                .show(ui, |ui| {
                    ui.strong("ID");
                    ui.strong("Length (aa)");
                    ui.strong("Identity to human (%)");
                    if show_cluster {
                        ui.strong("AI Cluster");
                    }
                    ui.end_row();

                    for &i in &order {
                        let record = &context.table.records[i];
                        ui.monospace(&record.id);
                        match record.length {
                            Some(length) => ui.label(format!("{}", length)),
                            None => ui.label("-"),
                        };
                        match record.identity_to_human {
                            Some(identity) => ui.label(format!("{:.2}", identity)),
                            None => ui.label("-"),
                        };
                        if show_cluster {
                            match (record.cluster, &context.cluster_labels) {
                                (Some(cluster), Some(catalog)) => {
                                    ui.label(format!("{} ({})", cluster, catalog.label(cluster)))
                                }
                                _ => ui.label("-"),
                            };
                        }
                        ui.end_row();
                    }
                });
        });

        ui.add_space(5.0);
        ui.label(
            "Sequences with higher identity to human TP53 are more likely to preserve \
             tumor-suppressor functions similar to human TP53.",
        );
    }

    fn show_explore_tab(&mut self, ui: &mut egui::Ui) {
        let ids = match &self.context {
            Some(context) => context.table.ids(),
            None => return,
        };

        ui.heading("Explore a Single TP53 / RTG Sequence");
        ui.separator();
        ui.label("Choose a sequence ID to see its properties and how similar it is to human TP53.");
        ui.add_space(5.0);

        let mut explain_clicked = false;
        ui.horizontal(|ui| {
            egui::ComboBox::from_label("Sequence ID")
                .selected_text(self.selected_id.as_deref().unwrap_or("Select..."))
                .show_ui(ui, |ui| {
                    for id in &ids {
                        ui.selectable_value(&mut self.selected_id, Some(id.clone()), id);
                    }
                });
            ui.add_space(10.0);
            let can_explain = self.selected_id.is_some();
            if ui
                .add_enabled(can_explain, egui::Button::new("Explain"))
                .clicked()
            {
                explain_clicked = true;
            }
        });
        if explain_clicked {
            self.run_explain();
        }

        let Some(context) = &self.context else {
            return;
        };
        let Some(explanation) = &self.explanation else {
            ui.add_space(10.0);
            ui.label("No summary yet. Select an ID and press Explain.");
            return;
        };

        ui.add_space(10.0);
        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.group(|ui| {
                ui.strong("Summary");
                // Read-only TextEdit keeps the text selectable for copying
                let mut summary = explanation.summary.as_str();
                ui.add(
                    egui::TextEdit::multiline(&mut summary)
                        .font(egui::TextStyle::Monospace)
                        .desired_width(f32::INFINITY),
                );
            });

            let record = self
                .selected_id
                .as_deref()
                .and_then(|id| context.table.find(id));

            if let Some(record) = record {
                if !record.composition.is_empty() {
                    egui::CollapsingHeader::new("Amino acid composition (fraction)").show(
                        ui,
                        |ui| {
                            egui::Grid::new("composition_grid").striped(true).show(
                                ui,
                                |ui| {
                                    ui.strong("Amino Acid");
                                    ui.strong("Fraction");
                                    ui.end_row();
                                    for (aa, fraction) in &record.composition {
                                        ui.monospace(aa);
                                        ui.label(format!("{:.4}", fraction));
                                        ui.end_row();
                                    }
                                },
                            );
                        },
                    );
                }
            }

            if let Some(id) = self.selected_id.as_deref() {
                match context.sequences.get(id) {
                    Some(sequence) => {
                        egui::CollapsingHeader::new(format!(
                            "Cleaned protein sequence ({} aa)",
                            sequence.len()
                        ))
                        .show(ui, |ui| {
                            let mut seq = sequence;
                            ui.add(
                                egui::TextEdit::multiline(&mut seq)
                                    .font(egui::TextStyle::Monospace)
                                    .desired_width(f32::INFINITY),
                            );
                        });
                    }
                    None => {
                        ui.label("No cleaned protein sequence for this ID in the FASTA file.");
                    }
                }
            }

            ui.add_space(10.0);
            ui.separator();
            ui.columns(3, |cols| {
                show_figure(
                    &mut cols[0],
                    "Phylogenetic Tree",
                    &context.assets.tree,
                    "Global figure, not specific to this sequence.",
                );
                show_figure(
                    &mut cols[1],
                    "MSA Logo",
                    &context.assets.logo,
                    "Global figure, not specific to this sequence.",
                );
                show_figure(
                    &mut cols[2],
                    "Identity Bar Plot",
                    &context.assets.barplot,
                    "Global figure, not specific to this sequence.",
                );
            });
        });
    }

    fn show_about_tab(&mut self, ui: &mut egui::Ui) {
        ui.heading("About This App");
        ui.separator();
        ui.label("Project: AI-driven comparative analysis of TP53 paralogs in elephants and humans.");
        ui.add_space(5.0);
        ui.label(
            "This application is a viewer over a bioinformatics and AI pipeline that \
             collected TP53-like sequences from NCBI / UniProt, performed BLAST, multiple \
             sequence alignment and phylogenetic analysis, extracted sequence features and \
             similarity to human TP53, and used clustering to group sequences into \
             similarity-based categories.",
        );
        ui.add_space(5.0);
        ui.label(
            "The goal is to help explain how multiple TP53 retrogenes in elephants may \
             contribute to their remarkable resistance to cancer (Peto's Paradox). No \
             alignment, phylogenetic inference or clustering runs here: all results were \
             computed upstream and are only displayed.",
        );
    }
}

/// Render one pre-rendered figure with a caption, or the standard
/// warning when the file was missing at load time.
fn show_figure(ui: &mut egui::Ui, title: &str, asset: &ImageAsset, caption: &str) {
    ui.group(|ui| {
        ui.strong(title);
        if asset.exists {
            ui.add(
                egui::Image::new(format!("file://{}", asset.path.display()))
                    .max_width(ui.available_width().min(640.0)),
            );
            ui.small(caption);
        } else {
            ui.colored_label(
                egui::Color32::YELLOW,
                format!("Image not found: {}", asset.path.display()),
            );
        }
    });
}
