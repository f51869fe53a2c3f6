use crate::charts::Figure;
use crate::core::{Kpis, TableMetadata};
use crate::dashboard::company_view::CompanyCharts;
use color_eyre::Result;
use serde::Serialize;
use std::collections::BTreeMap;

/// Plotly.js bundle used by the browser to draw every figure
pub const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// Route the selector calls with `?company=`
pub const COMPANY_CHARTS_ROUTE: &str = "/api/company-charts";

/// Everything the page shows on first load
#[derive(Debug, Clone, Copy)]
pub struct PageData<'a> {
    pub kpis: &'a Kpis,
    pub overview: [(&'static str, &'a Figure); 5],
    pub companies: &'a [String],
    pub initial: &'a CompanyCharts,
    pub metadata: &'a TableMetadata,
}

#[derive(Serialize)]
struct EmbeddedFigures<'a> {
    overview: BTreeMap<&'static str, &'a Figure>,
    company: &'a CompanyCharts,
}

/// Render the complete HTML document
pub fn render(data: &PageData<'_>) -> Result<String> {
    let figures = EmbeddedFigures {
        overview: data.overview.iter().copied().collect(),
        company: data.initial,
    };
    let figures_json = script_safe(&serde_json::to_string(&figures)?);

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Tech Acquisitions Dashboard</title>
    <script src="{plotly}"></script>
    <style>{css}</style>
</head>
<body>
    <div class="container">
        <header class="header">
            <h1>Tech Acquisitions</h1>
            <p class="subtitle">Who bought whom, when, and for how much</p>
        </header>
        <nav class="tabs">
            <button class="tab-button active" data-tab="overview">Overview</button>
            <button class="tab-button" data-tab="company">By company</button>
        </nav>
        <section id="tab-overview" class="tab-panel active">
            {kpis}
            <div class="chart-grid">
                <div id="by-parent" class="chart"></div>
                <div id="top-prices" class="chart"></div>
                <div id="by-business" class="chart"></div>
                <div id="by-product" class="chart"></div>
                <div id="by-country" class="chart wide"></div>
            </div>
        </section>
        <section id="tab-company" class="tab-panel">
            <div class="selector">
                <label for="company-select">Parent company</label>
                {selector}
                <span id="company-status" class="status"></span>
            </div>
            <div class="chart-grid">
                <div id="company-years" class="chart"></div>
                <div id="company-countries" class="chart"></div>
                <div id="company-prices" class="chart wide"></div>
            </div>
        </section>
        <footer class="footer">Data: {source}</footer>
    </div>
    <script>const FIGURES = {figures}; const COMPANY_CHARTS_ROUTE = "{route}";</script>
    <script>{js}</script>
</body>
</html>"#,
        plotly = PLOTLY_CDN,
        css = CSS,
        kpis = kpi_cards(data.kpis),
        selector = company_selector(data.companies),
        source = escape_html(&data.metadata.to_string()),
        figures = figures_json,
        route = COMPANY_CHARTS_ROUTE,
        js = JAVASCRIPT,
    ))
}

fn kpi_cards(kpis: &Kpis) -> String {
    let cards = [
        ("Parent companies", kpis.parent_companies),
        ("Acquired companies", kpis.acquired_companies),
        ("Acquisitions", kpis.acquisitions),
    ];
    let body: String = cards
        .iter()
        .map(|(label, value)| {
            format!(
                r#"<div class="stat-card"><div class="stat-value">{value}</div><div class="stat-label">{label}</div></div>"#
            )
        })
        .collect();
    format!(r#"<div class="stats-grid">{body}</div>"#)
}

/// `<select>` with an "All companies" entry followed by every parent
fn company_selector(companies: &[String]) -> String {
    let mut options = String::from(r#"<option value="" selected>All companies</option>"#);
    for company in companies {
        let escaped = escape_html(company);
        options.push_str(&format!(r#"<option value="{escaped}">{escaped}</option>"#));
    }
    format!(r#"<select id="company-select">{options}</select>"#)
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// JSON embedded in a `<script>` must not close the element early
fn script_safe(json: &str) -> String {
    json.replace("</", "<\\/").replace("<!--", "<\\!--")
}

const CSS: &str = r#"
    :root {
        --primary-color: #3b528b;
        --bg-color: #f8fafc;
        --card-bg: #ffffff;
        --border-color: #e2e8f0;
        --text-primary: #1e293b;
        --text-secondary: #64748b;
    }

    * { margin: 0; padding: 0; box-sizing: border-box; }

    body {
        font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
        background-color: var(--bg-color);
        color: var(--text-primary);
        line-height: 1.6;
    }

    .container { max-width: 1400px; margin: 0 auto; padding: 2rem; }

    .header { text-align: center; margin-bottom: 1.5rem; }
    .header h1 { font-size: 2.25rem; color: var(--primary-color); }
    .subtitle { color: var(--text-secondary); }

    .tabs { display: flex; gap: 0.5rem; border-bottom: 1px solid var(--border-color); margin-bottom: 1.5rem; }
    .tab-button {
        border: none;
        background: none;
        padding: 0.75rem 1.25rem;
        font-size: 1rem;
        cursor: pointer;
        color: var(--text-secondary);
        border-bottom: 3px solid transparent;
    }
    .tab-button.active { color: var(--primary-color); border-bottom-color: var(--primary-color); font-weight: 600; }

    .tab-panel { display: none; }
    .tab-panel.active { display: block; }

    .stats-grid {
        display: grid;
        grid-template-columns: repeat(auto-fit, minmax(220px, 1fr));
        gap: 1rem;
        margin-bottom: 1.5rem;
    }
    .stat-card {
        background: var(--card-bg);
        border: 1px solid var(--border-color);
        border-radius: 0.5rem;
        padding: 1.25rem;
        text-align: center;
        box-shadow: 0 1px 3px rgba(0, 0, 0, 0.08);
    }
    .stat-value { font-size: 2rem; font-weight: 700; color: var(--primary-color); }
    .stat-label { color: var(--text-secondary); font-size: 0.9rem; text-transform: uppercase; letter-spacing: 0.05em; }

    .chart-grid { display: grid; grid-template-columns: repeat(2, minmax(0, 1fr)); gap: 1rem; }
    .chart {
        background: var(--card-bg);
        border: 1px solid var(--border-color);
        border-radius: 0.5rem;
        min-height: 420px;
    }
    .chart.wide { grid-column: 1 / -1; }

    .selector { display: flex; align-items: center; gap: 0.75rem; margin-bottom: 1rem; }
    .selector select { padding: 0.4rem 0.6rem; font-size: 1rem; min-width: 240px; }
    .status { color: #b91c1c; }

    .footer { margin-top: 2rem; text-align: center; color: var(--text-secondary); font-size: 0.85rem; }

    @media (max-width: 900px) {
        .chart-grid { grid-template-columns: 1fr; }
    }
"#;

const JAVASCRIPT: &str = r#"
    const PLOT_CONFIG = { responsive: true, displaylogo: false };

    function draw(id, figure) {
        Plotly.react(id, figure.data, figure.layout, PLOT_CONFIG);
    }

    function drawCompany(charts) {
        draw('company-years', charts.year_histogram);
        draw('company-countries', charts.countries);
        draw('company-prices', charts.top_prices);
    }

    Object.entries(FIGURES.overview).forEach(([id, figure]) => draw(id, figure));
    drawCompany(FIGURES.company);

    document.querySelectorAll('.tab-button').forEach((button) => {
        button.addEventListener('click', () => {
            document.querySelectorAll('.tab-button').forEach((b) => b.classList.remove('active'));
            document.querySelectorAll('.tab-panel').forEach((p) => p.classList.remove('active'));
            button.classList.add('active');
            const panel = document.getElementById('tab-' + button.dataset.tab);
            panel.classList.add('active');
            panel.querySelectorAll('.chart').forEach((chart) => Plotly.Plots.resize(chart));
        });
    });

    const status = document.getElementById('company-status');
    document.getElementById('company-select').addEventListener('change', async (event) => {
        status.textContent = '';
        try {
            const query = encodeURIComponent(event.target.value);
            const response = await fetch(COMPANY_CHARTS_ROUTE + '?company=' + query);
            if (!response.ok) {
                status.textContent = await response.text();
                return;
            }
            drawCompany(await response.json());
        } catch (err) {
            status.textContent = 'Failed to update charts: ' + err;
        }
    });
"#;
