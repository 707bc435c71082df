use anyhow::Result;
use chrono::{Months, NaiveDate};
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Points},
        Axis, BarChart, Block, Borders, Cell, Chart, Dataset, GraphType, Paragraph, Row, Table,
        TableState,
    },
    Frame, Terminal,
};
use shelter_dashboard::{
    BatchSummary, DashboardSettings, DashboardView, DataQualityEngine, DateRange, FilterCriteria,
    FilterDimension, FilterOptions, RecordStore,
};
use std::io;

/// Bins in the days-in-shelter histogram
const HISTOGRAM_BINS: usize = 30;

const DIMENSIONS: [FilterDimension; 3] = [
    FilterDimension::AnimalType,
    FilterDimension::Sex,
    FilterDimension::IntakeCondition,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Overview,
    Trend,
    AnimalTypes,
    DaysInShelter,
    Map,
    Filters,
}

const PAGES: [Page; 6] = [
    Page::Overview,
    Page::Trend,
    Page::AnimalTypes,
    Page::DaysInShelter,
    Page::Map,
    Page::Filters,
];

impl Page {
    pub fn next(&self) -> Self {
        match self {
            Page::Overview => Page::Trend,
            Page::Trend => Page::AnimalTypes,
            Page::AnimalTypes => Page::DaysInShelter,
            Page::DaysInShelter => Page::Map,
            Page::Map => Page::Filters,
            Page::Filters => Page::Overview,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            Page::Overview => Page::Filters,
            Page::Trend => Page::Overview,
            Page::AnimalTypes => Page::Trend,
            Page::DaysInShelter => Page::AnimalTypes,
            Page::Map => Page::DaysInShelter,
            Page::Filters => Page::Map,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Page::Overview => "Overview",
            Page::Trend => "Intake Trend",
            Page::AnimalTypes => "Animal Types",
            Page::DaysInShelter => "Days in Shelter",
            Page::Map => "Map",
            Page::Filters => "Filters",
        }
    }
}

/// One line of the Filters page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterRow {
    Value(FilterDimension, String),
    Start,
    End,
}

pub struct App {
    pub store: RecordStore,
    pub settings: DashboardSettings,
    pub options: FilterOptions,
    pub criteria: FilterCriteria,
    pub view: DashboardView,
    pub quality: BatchSummary,
    pub current_page: Page,
    pub filter_rows: Vec<FilterRow>,
    pub filter_state: TableState,
    pub zone_state: TableState,
}

impl App {
    pub fn new(store: RecordStore, settings: DashboardSettings) -> Self {
        let options = store.filter_options();
        Self::with_options(store, settings, options)
    }

    pub fn with_options(store: RecordStore, settings: DashboardSettings, options: FilterOptions) -> Self {
        let criteria = FilterCriteria::select_all(&options);
        let view = DashboardView::build(&store, &criteria, &settings);

        let engine = DataQualityEngine::new();
        let quality = engine.batch_summary(&engine.validate_batch(store.records()));

        let mut filter_rows: Vec<FilterRow> = DIMENSIONS
            .iter()
            .flat_map(|dimension| {
                options
                    .values(*dimension)
                    .iter()
                    .map(move |value| FilterRow::Value(*dimension, value.clone()))
            })
            .collect();
        filter_rows.push(FilterRow::Start);
        filter_rows.push(FilterRow::End);

        let mut filter_state = TableState::default();
        filter_state.select(Some(0));

        let mut zone_state = TableState::default();
        if !view.geo.open_zones.is_empty() {
            zone_state.select(Some(0));
        }

        Self {
            store,
            settings,
            options,
            criteria,
            view,
            quality,
            current_page: Page::Overview,
            filter_rows,
            filter_state,
            zone_state,
        }
    }

    /// Rerun the pipeline after any criteria change
    fn refresh(&mut self) {
        self.view = DashboardView::build(&self.store, &self.criteria, &self.settings);

        let zones = self.view.geo.open_zones.len();
        match self.zone_state.selected() {
            _ if zones == 0 => self.zone_state.select(None),
            Some(i) if i >= zones => self.zone_state.select(Some(zones - 1)),
            None => self.zone_state.select(Some(0)),
            _ => {}
        }
    }

    pub fn next_page(&mut self) {
        self.current_page = self.current_page.next();
    }

    pub fn previous_page(&mut self) {
        self.current_page = self.current_page.previous();
    }

    pub fn selected_filter_row(&self) -> Option<&FilterRow> {
        self.filter_state.selected().and_then(|i| self.filter_rows.get(i))
    }

    /// Space on the Filters page
    pub fn toggle_selected(&mut self) {
        if let Some(FilterRow::Value(dimension, value)) = self.selected_filter_row().cloned() {
            self.criteria.toggle(dimension, &value);
            self.refresh();
        }
    }

    /// Left/Right on the Filters page: move a date bound by whole months,
    /// kept inside the data's range and never crossing the other bound
    pub fn shift_selected_date(&mut self, months: i32) {
        let row = match self.selected_filter_row() {
            Some(row @ (FilterRow::Start | FilterRow::End)) => row.clone(),
            _ => return,
        };

        let bounds = self.options.date_range;
        let mut range = self.criteria.date_range.unwrap_or(bounds);

        match row {
            FilterRow::Start => {
                range.start = shift_month(range.start, months).max(bounds.start).min(range.end);
            }
            FilterRow::End => {
                range.end = shift_month(range.end, months).min(bounds.end).max(range.start);
            }
            FilterRow::Value(..) => {}
        }

        self.criteria.date_range = Some(range);
        self.refresh();
    }

    /// Empty the current row's dimension, or drop the date range
    pub fn clear_selected(&mut self) {
        match self.selected_filter_row().cloned() {
            Some(FilterRow::Value(dimension, _)) => match dimension {
                FilterDimension::AnimalType => self.criteria.animal_types.clear(),
                FilterDimension::Sex => self.criteria.sexes.clear(),
                FilterDimension::IntakeCondition => self.criteria.intake_conditions.clear(),
            },
            Some(FilterRow::Start | FilterRow::End) => self.criteria.date_range = None,
            None => return,
        }
        self.refresh();
    }

    /// Back to the initial state: everything selected, full range
    pub fn reset_filters(&mut self) {
        self.criteria = FilterCriteria::select_all(&self.options);
        self.refresh();
    }

    pub fn next(&mut self) {
        let (state, len) = self.list_state();
        step(state, len, 1);
    }

    pub fn previous(&mut self) {
        let (state, len) = self.list_state();
        step(state, len, -1);
    }

    /// The list the arrow keys move through on the current page
    fn list_state(&mut self) -> (&mut TableState, usize) {
        match self.current_page {
            Page::Map => (&mut self.zone_state, self.view.geo.open_zones.len()),
            _ => (&mut self.filter_state, self.filter_rows.len()),
        }
    }
}

fn step(state: &mut TableState, len: usize, delta: isize) {
    if len == 0 {
        return;
    }
    let current = state.selected().unwrap_or(0) as isize;
    let next = (current + delta).rem_euclid(len as isize) as usize;
    state.select(Some(next));
}

fn shift_month(day: NaiveDate, months: i32) -> NaiveDate {
    let shifted = if months >= 0 {
        day.checked_add_months(Months::new(months.unsigned_abs()))
    } else {
        day.checked_sub_months(Months::new(months.unsigned_abs()))
    };
    shifted.unwrap_or(day)
}

/// Equal-width integer bins over [min, max], labelled "lo-hi"
pub fn histogram(values: &[i64], bins: usize) -> Vec<(String, u64)> {
    let (Some(&min), Some(&max)) = (values.iter().min(), values.iter().max()) else {
        return Vec::new();
    };

    let bins = bins.max(1) as i64;
    let span = max - min + 1;
    let width = ((span + bins - 1) / bins).max(1);
    let count = ((span + width - 1) / width) as usize;

    let mut counts = vec![0u64; count];
    for value in values {
        counts[((value - min) / width) as usize] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, n)| {
            let lo = min + i as i64 * width;
            let hi = lo + width - 1;
            let label = if width == 1 {
                lo.to_string()
            } else {
                format!("{}-{}", lo, hi)
            };
            (label, n)
        })
        .collect()
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            let on_filters = app.current_page == Page::Filters;
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::BackTab => app.previous_page(),
                KeyCode::Tab => {
                    if key.modifiers.contains(KeyModifiers::SHIFT) {
                        app.previous_page();
                    } else {
                        app.next_page();
                    }
                }
                KeyCode::Char('r') => app.reset_filters(),
                KeyCode::Char(' ') if on_filters => app.toggle_selected(),
                KeyCode::Char('c') if on_filters => app.clear_selected(),
                KeyCode::Left | KeyCode::Char('h') if on_filters => app.shift_selected_date(-1),
                KeyCode::Right | KeyCode::Char('l') if on_filters => app.shift_selected_date(1),
                KeyCode::Down | KeyCode::Char('j') => app.next(),
                KeyCode::Up | KeyCode::Char('k') => app.previous(),
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with navigation
            Constraint::Length(if app.view.warning.is_some() { 3 } else { 0 }),
            Constraint::Min(0),    // Content area
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    if let Some(warning) = &app.view.warning {
        let banner = Paragraph::new(Span::styled(
            format!(" ⚠️  {}", warning),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ))
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Yellow)));
        f.render_widget(banner, chunks[1]);
    }

    match app.current_page {
        Page::Overview => render_overview(f, chunks[2], app),
        Page::Trend => render_trend(f, chunks[2], app),
        Page::AnimalTypes => render_animal_types(f, chunks[2], app),
        Page::DaysInShelter => render_days_in_shelter(f, chunks[2], app),
        Page::Map => render_map(f, chunks[2], app),
        Page::Filters => render_filters(f, chunks[2], app),
    }

    render_status_bar(f, chunks[3], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let mut tab_spans = vec![];
    for (i, page) in PAGES.iter().enumerate() {
        if i > 0 {
            tab_spans.push(Span::raw(" │ "));
        }

        let style = if *page == app.current_page {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        tab_spans.push(Span::styled(page.title(), style));
    }

    let overview = &app.view.overview;
    tab_spans.push(Span::raw("  |  "));
    tab_spans.push(Span::styled(
        format!("Shown: {}/{}", overview.shown_records, overview.total_records),
        Style::default().fg(Color::White),
    ));
    tab_spans.push(Span::raw("  "));
    tab_spans.push(Span::styled(
        format!("Open: {}", overview.open_cases_shown),
        Style::default().fg(Color::Green),
    ));

    let header = Paragraph::new(Line::from(tab_spans))
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Cyan)));

    f.render_widget(header, area);
}

fn render_overview(f: &mut Frame, area: Rect, app: &App) {
    let overview = &app.view.overview;
    let label = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let value = Style::default().fg(Color::Green);

    let mut content = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("  Source:            ", label),
            Span::styled(app.store.source_name().to_string(), value),
        ]),
        Line::from(vec![
            Span::styled("  Records shown:     ", label),
            Span::styled(format!("{} of {}", overview.shown_records, overview.total_records), value),
        ]),
        Line::from(vec![
            Span::styled("  Open cases:        ", label),
            Span::styled(
                format!("{} of {}", overview.open_cases_shown, overview.open_cases_total),
                value,
            ),
        ]),
    ];

    if let Some(summary) = app.view.days_in_shelter.summary() {
        content.push(Line::from(vec![
            Span::styled("  Days in shelter:   ", label),
            Span::styled(
                format!("median {:.1}, mean {:.1} ({} outcomes)", summary.median, summary.mean, summary.count),
                value,
            ),
        ]));
    }

    content.push(Line::from(""));
    content.push(Line::from("  ─────────────────────────────────────"));
    content.push(Line::from(""));
    content.push(Line::from(Span::styled(
        "  DATA QUALITY",
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
    )));
    content.push(Line::from(""));
    content.push(Line::from(format!("  {}", app.quality.summary())));
    for (field, count) in &app.quality.issues_by_field {
        content.push(Line::from(Span::styled(
            format!("    {:<12} {} issue(s)", field, count),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let failures = app.store.normalization_report().total_failures();
    if failures > 0 {
        content.push(Line::from(Span::styled(
            format!("  {} unparseable date value(s) treated as missing", failures),
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )));
    }

    let panel = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Overview "),
    );

    f.render_widget(panel, area);
}

fn render_trend(f: &mut Frame, area: Rect, app: &App) {
    let trend = &app.view.monthly_intake;
    let data: Vec<(f64, f64)> = trend
        .points
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.count as f64))
        .collect();

    let max_count = trend.points.iter().map(|p| p.count).max().unwrap_or(0).max(1) as f64;
    let x_max = (data.len().max(2) - 1) as f64;

    let x_labels: Vec<Span> = match (trend.points.first(), trend.points.last()) {
        (Some(first), Some(last)) => vec![
            Span::raw(first.month.format("%Y-%m").to_string()),
            Span::raw(last.month.format("%Y-%m").to_string()),
        ],
        _ => vec![Span::raw("")],
    };

    let dataset = Dataset::default()
        .name("Intakes")
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Cyan))
        .data(&data);

    let title = if trend.undated > 0 {
        format!(" Monthly Intake Trend ({} undated) ", trend.undated)
    } else {
        " Monthly Intake Trend ".to_string()
    };

    let chart = Chart::new(vec![dataset])
        .block(Block::default().borders(Borders::ALL).title(title))
        .x_axis(
            Axis::default()
                .title("Intake Month")
                .style(Style::default().fg(Color::DarkGray))
                .bounds([0.0, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title("Number of Intakes")
                .style(Style::default().fg(Color::DarkGray))
                .bounds([0.0, max_count])
                .labels(vec![Span::raw("0"), Span::raw(format!("{}", max_count as usize))]),
        );

    f.render_widget(chart, area);
}

fn render_animal_types(f: &mut Frame, area: Rect, app: &App) {
    let bars: Vec<(&str, u64)> = app
        .view
        .animal_types
        .counts
        .iter()
        .map(|c| (c.animal_type.as_str(), c.count as u64))
        .collect();

    let chart = BarChart::default()
        .block(Block::default().borders(Borders::ALL).title(" Animal Type Frequency "))
        .bar_width(9)
        .bar_gap(2)
        .bar_style(Style::default().fg(Color::Yellow))
        .value_style(Style::default().fg(Color::Black).bg(Color::Yellow))
        .data(bars.as_slice());

    f.render_widget(chart, area);
}

fn render_days_in_shelter(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default().borders(Borders::ALL).title(" Days in Shelter Distribution ");

    if app.view.days_in_shelter.is_empty() {
        let empty = Paragraph::new(Span::styled(
            "  No Days in Shelter data available.",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        ))
        .block(block);
        f.render_widget(empty, area);
        return;
    }

    let bins = histogram(app.view.days_in_shelter.values(), HISTOGRAM_BINS);
    let bars: Vec<(&str, u64)> = bins.iter().map(|(label, n)| (label.as_str(), *n)).collect();

    let chart = BarChart::default()
        .block(block)
        .bar_width(5)
        .bar_gap(1)
        .bar_style(Style::default().fg(Color::Green))
        .value_style(Style::default().fg(Color::Black).bg(Color::Green))
        .data(bars.as_slice());

    f.render_widget(chart, area);
}

fn render_map(f: &mut Frame, area: Rect, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(area);

    let geo = &app.view.geo;
    let points: Vec<(f64, f64)> = geo.points.iter().map(|p| (p.longitude, p.latitude)).collect();
    let zones: Vec<(f64, f64)> = geo
        .open_zones
        .iter()
        .filter_map(|z| z.location())
        .map(|p| (p.longitude, p.latitude))
        .collect();

    // Frame the markers, padded; a small box around the center otherwise
    let pad = 0.02;
    let (x_bounds, y_bounds) = if points.is_empty() {
        (
            [geo.center.longitude - 0.1, geo.center.longitude + 0.1],
            [geo.center.latitude - 0.1, geo.center.latitude + 0.1],
        )
    } else {
        let xs = points.iter().map(|p| p.0);
        let ys = points.iter().map(|p| p.1);
        (
            [xs.clone().fold(f64::INFINITY, f64::min) - pad, xs.fold(f64::NEG_INFINITY, f64::max) + pad],
            [ys.clone().fold(f64::INFINITY, f64::min) - pad, ys.fold(f64::NEG_INFINITY, f64::max) + pad],
        )
    };

    let title = if geo.center_is_fallback {
        " Map (no coordinates in selection) ".to_string()
    } else {
        format!(" Map ({} markers) ", points.len())
    };

    let canvas = Canvas::default()
        .block(Block::default().borders(Borders::ALL).title(title))
        .marker(symbols::Marker::Braille)
        .x_bounds(x_bounds)
        .y_bounds(y_bounds)
        .paint(|ctx| {
            ctx.draw(&Points {
                coords: &points,
                color: Color::Cyan,
            });
            ctx.layer();
            ctx.draw(&Points {
                coords: &zones,
                color: Color::Red,
            });
        });

    f.render_widget(canvas, chunks[0]);

    let header = Row::new(["Zip Code", "Open"].iter().map(|h| {
        Cell::from(*h).style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
    }))
    .style(Style::default().bg(Color::DarkGray));

    let rows = geo.open_zones.iter().map(|zone| {
        Row::new(vec![
            Cell::from(zone.zip_code.clone()),
            Cell::from(zone.open_cases.to_string()).style(Style::default().fg(Color::Red)),
        ])
    });

    let title = if geo.unzoned_open_cases > 0 {
        format!(" Open Cases by Zip ({} without zip) ", geo.unzoned_open_cases)
    } else {
        " Open Cases by Zip ".to_string()
    };

    let table = Table::new(rows, [Constraint::Length(12), Constraint::Length(8)])
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("→ ");

    f.render_stateful_widget(table, chunks[1], &mut app.zone_state);
}

fn render_filters(f: &mut Frame, area: Rect, app: &mut App) {
    let range = app.criteria.date_range;

    let rows = app.filter_rows.iter().map(|row| {
        let (group, label, mark) = match row {
            FilterRow::Value(dimension, value) => {
                let selected = app.criteria.selected(*dimension);
                let mark = if selected.is_empty() {
                    "[-]" // empty = no restriction
                } else if selected.contains(value) {
                    "[x]"
                } else {
                    "[ ]"
                };
                (dimension.label().to_string(), value.clone(), mark)
            }
            FilterRow::Start => ("Intake From".to_string(), format_bound(range, |r| r.start), "◀▶"),
            FilterRow::End => ("Intake To".to_string(), format_bound(range, |r| r.end), "◀▶"),
        };

        Row::new(vec![
            Cell::from(mark).style(Style::default().fg(Color::Green)),
            Cell::from(group).style(Style::default().fg(Color::Cyan)),
            Cell::from(label),
        ])
    });

    let table = Table::new(
        rows,
        [Constraint::Length(4), Constraint::Length(18), Constraint::Min(10)],
    )
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Filters "),
    )
    .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.filter_state);
}

fn format_bound(range: Option<DateRange>, pick: impl Fn(&DateRange) -> NaiveDate) -> String {
    range
        .map(|r| pick(&r).format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "any".to_string())
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mut status_spans = vec![Span::styled(
        format!(" {} ", app.current_page.title()),
        Style::default().fg(Color::Cyan),
    )];

    if app.current_page == Page::Filters {
        status_spans.push(Span::raw(" | "));
        status_spans.push(Span::styled("Space", Style::default().fg(Color::Yellow)));
        status_spans.push(Span::raw(" Toggle | "));
        status_spans.push(Span::styled("←/→", Style::default().fg(Color::Yellow)));
        status_spans.push(Span::raw(" Month | "));
        status_spans.push(Span::styled("c", Style::default().fg(Color::Yellow)));
        status_spans.push(Span::raw(" Clear"));
    }

    status_spans.push(Span::raw(" | "));
    status_spans.push(Span::styled("r", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Reset | "));
    status_spans.push(Span::styled("Tab", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Page | "));
    status_spans.push(Span::styled("↑/↓", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Nav | "));
    status_spans.push(Span::styled("q", Style::default().fg(Color::Red)));
    status_spans.push(Span::raw(" Quit"));

    let status_bar = Paragraph::new(Line::from(status_spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}
