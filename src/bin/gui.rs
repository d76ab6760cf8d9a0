#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.

use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use std::{fs, mem};

use chem_engineering_toolkit::{
    app,
    config::{self, Config, UnitSystem, DEFAULT_CONFIG_PATH},
    conversion,
    equations::{Equation, ParamSpec},
    history::CalculationRecord,
    quantity::QuantityKind,
    session::{format_value, ParamInput, Session},
    sweep::{Sweep, SweepRequest},
};
use clap::Parser;
use eframe::{egui, App, Frame};
use egui_plot::{Legend, Line, Plot, PlotPoints};
use image::GenericImageView;
use rfd::FileDialog;

#[derive(Parser)]
#[command(name = "chem_engineering_toolkit", about = "Chemical engineering calculator (desktop)")]
struct GuiArgs {
    /// Path to the configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
}

fn main() -> Result<(), eframe::Error> {
    let args = GuiArgs::parse();
    let app_cfg = match config::load_or_default(&args.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Config error, using defaults: {e}");
            Config::default()
        }
    };
    app::init_tracing(&app_cfg.log_level);

    let mut viewport = egui::ViewportBuilder::default().with_inner_size([1100.0, 760.0]);
    if let Some(icon) = load_app_icon() {
        viewport = viewport.with_icon(icon);
    }
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    let config_path = args.config;
    eframe::run_native(
        "Chemical Engineering Toolkit",
        options,
        Box::new(move |_cc| Box::new(GuiApp::new(app_cfg, config_path))),
    )
}

fn load_app_icon() -> Option<egui::IconData> {
    let search = ["icon.png", "assets/icon.png", "../assets/icon.png"];
    let path = search.iter().find(|p| Path::new(*p).exists())?;
    let bytes = fs::read(path).ok()?;
    let img = image::load_from_memory(&bytes).ok()?;
    let (w, h) = img.dimensions();
    Some(egui::IconData {
        rgba: img.to_rgba8().into_raw(),
        width: w,
        height: h,
    })
}

fn label_with_tip(ui: &mut egui::Ui, text: &str, tip: &str) -> egui::Response {
    ui.label(text).on_hover_text(tip)
}

fn heading_with_tip(ui: &mut egui::Ui, text: &str, tip: &str) -> egui::Response {
    ui.heading(text).on_hover_text(tip)
}

fn error_label(ui: &mut egui::Ui, msg: &str) {
    ui.colored_label(ui.visuals().error_fg_color, msg);
}

/// 공식 참고 창에 표시하는 수식.
fn formula_text(equation: Equation) -> &'static str {
    match equation {
        Equation::Reynolds => "Re = ρ·v·D / μ  (laminar < 2300, turbulent > 4000)",
        Equation::DarcyWeisbach => "ΔP = f · (L/D) · ρ·v²/2",
        Equation::PumpPower => "P = ρ·g·Q·H / η,  g = 9.81 m/s²",
        Equation::Antoine => "log₁₀ P[mmHg] = A − B / (T[°C] + C)",
        Equation::BatchReactor => "C = C₀ · exp(−k·t),  X = 1 − C/C₀",
        Equation::Cstr => "C = C₀ / (1 + k·τ),  X = k·τ / (1 + k·τ)",
        Equation::Lmtd => "LMTD = (ΔT₁ − ΔT₂) / ln(ΔT₁/ΔT₂)",
        Equation::Arrhenius => "k = A · exp(−Ea / (R·T)),  R = 8.314 J/(mol·K)",
    }
}

/// 입력 칸 하나의 상태. 단위 문자열은 변환 가능한 파라미터만 바뀐다.
#[derive(Debug, Clone, PartialEq)]
struct ParamField {
    value: f64,
    unit: String,
}

/// 공식 하나의 입력 폼 상태.
#[derive(Debug, Clone, PartialEq)]
struct ParamForm {
    equation: Equation,
    fields: Vec<ParamField>,
}

impl ParamForm {
    fn new(equation: Equation) -> Self {
        let fields = equation
            .spec()
            .params
            .iter()
            .map(|p| ParamField {
                value: p.default,
                unit: p.unit.to_string(),
            })
            .collect();
        Self { equation, fields }
    }

    fn specs(&self) -> impl Iterator<Item = (&'static ParamSpec, &ParamField)> {
        self.equation.spec().params.iter().zip(self.fields.iter())
    }

    /// 세션에 넘길 입력 목록. `skip` 키는 제외한다.
    fn inputs(&self, skip: Option<&str>) -> Vec<ParamInput> {
        self.specs()
            .filter(|(spec, _)| Some(spec.key) != skip)
            .map(|(spec, field)| {
                if field.unit == spec.unit {
                    ParamInput::new(spec.key, field.value)
                } else {
                    ParamInput::with_unit(spec.key, field.value, field.unit.clone())
                }
            })
            .collect()
    }
}

/// 스윕 결과를 결측 구간에서 끊어 선분 목록으로 만든다.
fn plot_segments(sweep: &Sweep) -> Vec<Vec<[f64; 2]>> {
    let mut segments = Vec::new();
    let mut current = Vec::new();
    for p in sweep.points() {
        match p.output {
            Some(y) => current.push([p.input, y]),
            None if !current.is_empty() => segments.push(mem::take(&mut current)),
            None => {}
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

/// 스텝 슬라이더 범위. 최대값이 10보다 작으면 하한도 함께 내려간다.
fn steps_range(max_steps: usize) -> RangeInclusive<usize> {
    let max = max_steps.max(1);
    max.min(10)..=max
}

/// 계산 결과 패널에 보여줄 문자열.
#[derive(Debug, Clone)]
struct ResultView {
    lines: Vec<String>,
    note: Option<String>,
}

impl ResultView {
    fn from_record(record: &CalculationRecord, precision: usize) -> Self {
        let lines = record
            .outputs()
            .iter()
            .map(|o| format!("{}: {} {}", o.name, format_value(o.value, precision), o.unit))
            .collect();
        Self {
            lines,
            note: record.note().map(str::to_string),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Tab {
    Calculator,
    UnitConv,
    Parametric,
    History,
}

struct GuiApp {
    session: Session,
    config_path: PathBuf,
    tab: Tab,
    // 계산기
    calc_form: ParamForm,
    calc_result: Option<ResultView>,
    calc_error: Option<String>,
    // 단위 변환
    conv_kind: QuantityKind,
    conv_value: f64,
    conv_from: String,
    conv_to: String,
    conv_result: Option<String>,
    conv_error: Option<String>,
    // 파라메트릭 스터디
    sweep_form: ParamForm,
    sweep_var: usize,
    sweep_start: f64,
    sweep_end: f64,
    sweep_steps: usize,
    sweep: Option<Sweep>,
    sweep_error: Option<String>,
    sweep_status: Option<String>,
    // 설정
    show_settings_modal: bool,
    show_formula_modal: bool,
    settings_draft: Config,
    settings_status: Option<String>,
}

impl GuiApp {
    fn new(config: Config, config_path: PathBuf) -> Self {
        let steps = steps_range(config.sweep.max_steps);
        let sweep_steps = config.sweep.default_steps.clamp(*steps.start(), *steps.end());
        let settings_draft = config.clone();
        let mut app = Self {
            session: Session::new(config),
            config_path,
            tab: Tab::Calculator,
            calc_form: ParamForm::new(Equation::Reynolds),
            calc_result: None,
            calc_error: None,
            conv_kind: QuantityKind::Temperature,
            conv_value: 25.0,
            conv_from: String::new(),
            conv_to: String::new(),
            conv_result: None,
            conv_error: None,
            sweep_form: ParamForm::new(Equation::Reynolds),
            sweep_var: 0,
            sweep_start: 0.1,
            sweep_end: 10.0,
            sweep_steps,
            sweep: None,
            sweep_error: None,
            sweep_status: None,
            show_settings_modal: false,
            show_formula_modal: false,
            settings_draft,
            settings_status: None,
        };
        app.reset_conv_units();
        app
    }

    /// 변환 종류가 바뀌면 기본 단위와 기준 단위로 되돌린다.
    fn reset_conv_units(&mut self) {
        let from = self.session.config().default_units.for_kind(self.conv_kind);
        let mut to = self.conv_kind.base_unit();
        if to == from {
            to = self
                .conv_kind
                .units()
                .into_iter()
                .find(|u| *u != from)
                .unwrap_or(to);
        }
        self.conv_from = from.symbol().to_string();
        self.conv_to = to.symbol().to_string();
        self.conv_result = None;
        self.conv_error = None;
    }

    fn run_calculation(&mut self) {
        let inputs = self.calc_form.inputs(None);
        let precision = self.session.config().display.precision;
        match self.session.calculate(self.calc_form.equation, &inputs) {
            Ok(record) => {
                self.calc_result = Some(ResultView::from_record(record, precision));
                self.calc_error = None;
            }
            Err(e) => {
                self.calc_result = None;
                self.calc_error = Some(e.to_string());
            }
        }
    }

    fn run_conversion(&mut self) {
        let source = format!("{} {}", self.conv_value, self.conv_from);
        let precision = self.session.config().display.precision;
        match self
            .session
            .convert(self.conv_kind, self.conv_value, &self.conv_from, &self.conv_to)
        {
            Ok(record) => {
                self.conv_result = record
                    .outputs()
                    .first()
                    .map(|o| format!("{source} = {} {}", format_value(o.value, precision), o.unit));
                self.conv_error = None;
            }
            Err(e) => {
                self.conv_result = None;
                self.conv_error = Some(e.to_string());
            }
        }
    }

    fn run_sweep(&mut self) {
        let equation = self.sweep_form.equation;
        let Some(variable) = equation.spec().params.get(self.sweep_var) else {
            return;
        };
        let fixed = self.sweep_form.inputs(Some(variable.key));
        let outcome = self.session.resolve_inputs(equation, &fixed).and_then(|fixed| {
            self.session.sweep(&SweepRequest {
                equation,
                variable: variable.key.to_string(),
                start: self.sweep_start,
                end: self.sweep_end,
                steps: self.sweep_steps,
                fixed,
            })
        });
        self.sweep_status = None;
        match outcome {
            Ok(sweep) => {
                self.sweep = Some(sweep);
                self.sweep_error = None;
            }
            Err(e) => {
                self.sweep = None;
                self.sweep_error = Some(e.to_string());
            }
        }
    }

    fn save_sweep_csv(&mut self) {
        let Some(sweep) = &self.sweep else {
            return;
        };
        let Some(path) = FileDialog::new()
            .set_file_name(sweep.default_file_name())
            .add_filter("CSV", &["csv"])
            .save_file()
        else {
            return;
        };
        self.sweep_status = Some(match fs::write(&path, sweep.to_csv()) {
            Ok(()) => format!("Saved {}", path.display()),
            Err(e) => format!("Save error: {e}"),
        });
    }

    fn ui_nav(&mut self, ui: &mut egui::Ui) {
        ui.style_mut().wrap = Some(false);
        ui.vertical_centered(|ui| {
            ui.heading("Menu");
            ui.add_space(8.0);
        });
        let history_label = format!("History ({})", self.session.history().len());
        for (tab, label) in [
            (Tab::Calculator, "Calculator"),
            (Tab::UnitConv, "Unit Converter"),
            (Tab::Parametric, "Parametric Study"),
            (Tab::History, history_label.as_str()),
        ] {
            let selected = self.tab == tab;
            let button = egui::Button::new(label)
                .fill(if selected {
                    ui.visuals().selection.bg_fill
                } else {
                    ui.visuals().extreme_bg_color
                })
                .min_size(egui::vec2(ui.available_width(), 32.0));
            if ui.add(button).on_hover_text("Switch menu").clicked() {
                self.tab = tab;
            }
            ui.add_space(4.0);
        }
    }

    fn ui_calculator(&mut self, ui: &mut egui::Ui) {
        heading_with_tip(ui, "Calculator", "Evaluate a single chemical engineering equation.");
        ui.add_space(8.0);
        let before = self.calc_form.equation;
        let mut selected = before;
        equation_combo(ui, "calc_equation", &mut selected);
        if selected != before {
            self.calc_form = ParamForm::new(selected);
            self.calc_result = None;
            self.calc_error = None;
        }
        ui.label(selected.spec().description);
        ui.add_space(8.0);

        egui::Frame::group(ui.style()).show(ui, |ui| {
            param_grid(ui, "calc_grid", &mut self.calc_form, None);
        });
        ui.add_space(8.0);
        ui.horizontal(|ui| {
            if ui.button("Calculate").clicked() {
                self.run_calculation();
            }
            if ui.button("Reset defaults").clicked() {
                self.calc_form = ParamForm::new(selected);
            }
        });

        if let Some(err) = &self.calc_error {
            error_label(ui, err);
        }
        if let Some(result) = &self.calc_result {
            ui.separator();
            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.label(egui::RichText::new("Result").strong());
                for line in &result.lines {
                    ui.label(egui::RichText::new(line).monospace());
                }
                if let Some(note) = &result.note {
                    ui.label(note);
                }
            });
        }
    }

    fn ui_unit_conv(&mut self, ui: &mut egui::Ui) {
        heading_with_tip(ui, "Unit Converter", "Convert temperature, pressure, length and flow rate.");
        ui.add_space(8.0);
        let before = self.conv_kind;
        egui::Frame::group(ui.style()).show(ui, |ui| {
            egui::Grid::new("conv_grid")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    label_with_tip(ui, "Quantity", "Select the quantity type");
                    egui::ComboBox::from_id_source("conv_kind")
                        .selected_text(self.conv_kind.label())
                        .show_ui(ui, |ui| {
                            for kind in QuantityKind::ALL {
                                ui.selectable_value(&mut self.conv_kind, kind, kind.label());
                            }
                        });
                    ui.end_row();

                    ui.label("Value");
                    ui.add(egui::DragValue::new(&mut self.conv_value).speed(1.0));
                    ui.end_row();

                    ui.label("From");
                    unit_combo(ui, "conv_from", &mut self.conv_from, self.conv_kind);
                    ui.end_row();

                    ui.label("To");
                    unit_combo(ui, "conv_to", &mut self.conv_to, self.conv_kind);
                    ui.end_row();
                });
        });
        if self.conv_kind != before {
            self.reset_conv_units();
        }
        ui.add_space(8.0);
        ui.horizontal(|ui| {
            if ui.button("Convert").clicked() {
                self.run_conversion();
            }
            if ui.button("⇄ Swap").clicked() {
                mem::swap(&mut self.conv_from, &mut self.conv_to);
            }
        });
        if let Some(err) = &self.conv_error {
            error_label(ui, err);
        }
        if let Some(res) = &self.conv_result {
            ui.label(egui::RichText::new(res).monospace().strong());
        }
    }

    fn ui_parametric(&mut self, ui: &mut egui::Ui) {
        heading_with_tip(
            ui,
            "Parametric Study",
            "Vary one parameter over a range while keeping the others constant.",
        );
        ui.add_space(8.0);
        let before = self.sweep_form.equation;
        let mut selected = before;
        equation_combo(ui, "sweep_equation", &mut selected);
        if selected != before {
            self.sweep_form = ParamForm::new(selected);
            self.sweep_var = 0;
            self.sweep = None;
            self.sweep_error = None;
        }
        let params = selected.spec().params;
        let steps = steps_range(self.session.config().sweep.max_steps);

        egui::Frame::group(ui.style()).show(ui, |ui| {
            egui::Grid::new("sweep_range_grid")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    label_with_tip(ui, "Variable", "Parameter swept from start to end");
                    let current = params
                        .get(self.sweep_var)
                        .map(|p| p.display_label())
                        .unwrap_or_default();
                    egui::ComboBox::from_id_source("sweep_var")
                        .selected_text(current)
                        .show_ui(ui, |ui| {
                            for (i, p) in params.iter().enumerate() {
                                ui.selectable_value(&mut self.sweep_var, i, p.display_label());
                            }
                        });
                    ui.end_row();
                    ui.label("Start");
                    ui.add(egui::DragValue::new(&mut self.sweep_start).speed(0.1));
                    ui.end_row();
                    ui.label("End");
                    ui.add(egui::DragValue::new(&mut self.sweep_end).speed(0.1));
                    ui.end_row();
                    label_with_tip(
                        ui,
                        "Steps",
                        &format!("Number of points ({} to {})", steps.start(), steps.end()),
                    );
                    ui.add(egui::Slider::new(&mut self.sweep_steps, steps.clone()));
                    ui.end_row();
                });
        });
        ui.add_space(6.0);
        ui.label("Constant parameters");
        let skip = params.get(self.sweep_var).map(|p| p.key);
        egui::Frame::group(ui.style()).show(ui, |ui| {
            param_grid(ui, "sweep_grid", &mut self.sweep_form, skip);
        });
        ui.add_space(8.0);
        ui.horizontal(|ui| {
            if ui.button("Run Study").clicked() {
                self.run_sweep();
            }
            let can_save = self.sweep.is_some();
            if ui.add_enabled(can_save, egui::Button::new("Save CSV")).clicked() {
                self.save_sweep_csv();
            }
        });
        if let Some(err) = &self.sweep_error {
            error_label(ui, err);
        }
        if let Some(status) = &self.sweep_status {
            ui.label(status);
        }

        let Some(sweep) = &self.sweep else {
            return;
        };
        ui.separator();
        ui.label(egui::RichText::new(sweep.title()).strong());
        if sweep.gap_count() > 0 {
            ui.colored_label(
                ui.visuals().warn_fg_color,
                format!("{} point(s) outside the valid range are left blank.", sweep.gap_count()),
            );
        }
        let name = sweep.equation().spec().result_label;
        let color = ui.visuals().hyperlink_color;
        Plot::new("sweep_plot")
            .legend(Legend::default())
            .x_axis_label(sweep.x_label())
            .y_axis_label(sweep.y_label())
            .height(320.0)
            .show(ui, |plot_ui| {
                for segment in plot_segments(sweep) {
                    plot_ui.line(Line::new(PlotPoints::new(segment)).name(name).color(color));
                }
            });
    }

    fn ui_history(&mut self, ui: &mut egui::Ui) {
        heading_with_tip(ui, "Calculation History", "Newest calculations first. Kept until the app closes.");
        ui.add_space(8.0);
        let history = self.session.history();
        if history.is_empty() {
            ui.label("No calculations yet. Start calculating in the Calculator tab!");
            return;
        }
        ui.label(format!("Total calculations: {}", history.len()));
        let mut clear = false;
        if ui.button("Clear history").clicked() {
            clear = true;
        }
        ui.separator();
        let total = history.len();
        for (i, record) in history.iter_newest_first().enumerate() {
            let title = format!("{} - {}", record.name(), record.timestamp_label());
            egui::CollapsingHeader::new(title)
                .id_source(("history", total - i))
                .default_open(i == 0)
                .show(ui, |ui| {
                    ui.label(egui::RichText::new("Inputs").strong());
                    for input in record.inputs() {
                        ui.label(format!("- {}: {} {}", input.name, input.value, input.unit));
                    }
                    ui.label(egui::RichText::new("Result").strong());
                    for out in record.outputs() {
                        ui.label(format!(
                            "{}: {} {}",
                            out.name,
                            self.session.format_value(out.value),
                            out.unit
                        ));
                    }
                    if let Some(note) = record.note() {
                        ui.label(note);
                    }
                });
        }
        if clear {
            self.session.clear_history();
        }
    }

    fn ui_settings(&mut self, ctx: &egui::Context) {
        let mut open = self.show_settings_modal;
        let mut save = false;
        egui::Window::new("Settings")
            .collapsible(false)
            .resizable(true)
            .open(&mut open)
            .show(ctx, |ui| {
                ui.label("Unit system preset");
                ui.horizontal(|ui| {
                    for (label, system) in [("SI", UnitSystem::SI), ("Imperial", UnitSystem::Imperial)] {
                        if ui
                            .selectable_label(self.settings_draft.unit_system == system, label)
                            .clicked()
                        {
                            self.settings_draft.apply_unit_system(system);
                        }
                    }
                });
                ui.separator();
                egui::Grid::new("settings_grid").num_columns(2).show(ui, |ui| {
                    label_with_tip(ui, "History capacity", "0 keeps every record");
                    ui.add(egui::DragValue::new(&mut self.settings_draft.history.capacity).clamp_range(0..=10_000));
                    ui.end_row();
                    ui.label("Result precision");
                    ui.add(egui::DragValue::new(&mut self.settings_draft.display.precision).clamp_range(0..=15));
                    ui.end_row();
                    ui.label("Default sweep steps");
                    ui.add(egui::DragValue::new(&mut self.settings_draft.sweep.default_steps).clamp_range(1..=self.settings_draft.sweep.max_steps));
                    ui.end_row();
                });
                ui.separator();
                if ui.button("Save settings").clicked() {
                    save = true;
                }
                if let Some(msg) = &self.settings_status {
                    ui.label(msg);
                }
            });
        self.show_settings_modal = open;
        if save {
            let draft = self.settings_draft.clone();
            self.settings_status = Some(match draft.save(&self.config_path) {
                Ok(()) => format!("Saved to {}", self.config_path.display()),
                Err(e) => format!("Save error: {e}"),
            });
            let steps = steps_range(draft.sweep.max_steps);
            self.sweep_steps = self.sweep_steps.clamp(*steps.start(), *steps.end());
            self.session.set_config(draft);
        }
    }
}

fn equation_combo(ui: &mut egui::Ui, id: &str, selected: &mut Equation) {
    ui.horizontal(|ui| {
        label_with_tip(ui, "Equation", "Select the equation to evaluate");
        egui::ComboBox::from_id_source(id)
            .selected_text(selected.name())
            .width(220.0)
            .show_ui(ui, |ui| {
                for eq in Equation::ALL {
                    ui.selectable_value(selected, eq, eq.name());
                }
            });
    });
}

fn unit_combo(ui: &mut egui::Ui, id: impl std::hash::Hash, value: &mut String, kind: QuantityKind) {
    egui::ComboBox::from_id_source(id)
        .selected_text(value.as_str())
        .show_ui(ui, |ui| {
            for symbol in conversion::unit_options(kind) {
                ui.selectable_value(value, symbol.to_string(), symbol);
            }
        });
}

/// 파라미터 입력 표. 변환 가능한 파라미터는 단위 선택 상자를 함께 보여준다.
fn param_grid(ui: &mut egui::Ui, id: &str, form: &mut ParamForm, skip: Option<&str>) {
    let params = form.equation.spec().params;
    egui::Grid::new(id)
        .num_columns(3)
        .spacing([12.0, 8.0])
        .show(ui, |ui| {
            for (spec, field) in params.iter().zip(form.fields.iter_mut()) {
                ui.label(spec.label);
                if Some(spec.key) == skip {
                    ui.label("(varied)");
                    ui.end_row();
                    continue;
                }
                let speed = (field.value.abs() * 0.01).max(1e-4);
                ui.add(egui::DragValue::new(&mut field.value).speed(speed).max_decimals(8));
                match spec.quantity {
                    Some(kind) => unit_combo(ui, (id, spec.key), &mut field.unit, kind),
                    None => {
                        ui.label(spec.unit);
                    }
                }
                ui.end_row();
            }
        });
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        // 상단 바
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Chemical Engineering Toolkit");
                ui.separator();
                if ui.button("Formula reference").clicked() {
                    self.show_formula_modal = true;
                }
                if ui.button("Settings").clicked() {
                    self.settings_draft = self.session.config().clone();
                    self.settings_status = None;
                    self.show_settings_modal = true;
                }
            });
        });

        if self.show_settings_modal {
            self.ui_settings(ctx);
        }

        if self.show_formula_modal {
            egui::Window::new("Formula reference")
                .collapsible(true)
                .resizable(true)
                .open(&mut self.show_formula_modal)
                .show(ctx, |ui| {
                    ui.style_mut().wrap = Some(true);
                    for eq in Equation::ALL {
                        ui.label(egui::RichText::new(eq.name()).strong());
                        ui.label(egui::RichText::new(formula_text(eq)).monospace());
                        ui.add_space(4.0);
                    }
                });
        }

        // 좌측 네비 + 본문
        egui::SidePanel::left("nav")
            .resizable(true)
            .min_width(140.0)
            .default_width(180.0)
            .max_width(320.0)
            .show(ctx, |ui| {
                self.ui_nav(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| match self.tab {
                    Tab::Calculator => self.ui_calculator(ui),
                    Tab::UnitConv => self.ui_unit_conv(ui),
                    Tab::Parametric => self.ui_parametric(ui),
                    Tab::History => self.ui_history(ui),
                });
        });
    }
}
