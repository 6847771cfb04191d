use super::ProfileReport;
use crate::types::{CorrelationMatrix, HistogramBin, TableSample, VariableProfile};
use crate::utils::{format_float, html_escape};

const STYLE: &str = ":root{--bg:#f7fafc;--fg:#111827;--muted:#6b7280;--card:#ffffff;--border:#e5e7eb;--accent:#2563eb;--warn:#d97706;--bar:#60a5fa} \
body{margin:0;background:var(--bg);color:var(--fg);font-family:Segoe UI,system-ui,-apple-system,Arial,sans-serif} \
.container{max-width:1200px;margin:0 auto;padding:24px} .title{font-size:22px;font-weight:600} .sub{color:var(--muted);font-size:13px} \
nav a{margin-right:12px;color:var(--accent);text-decoration:none;font-size:13px} \
.grid{display:grid;grid-template-columns:repeat(4,minmax(0,1fr));gap:12px} \
.card{background:var(--card);border:1px solid var(--border);border-radius:10px;padding:14px;margin-bottom:12px} \
.metric .label{color:var(--muted);font-size:12px} .metric .value{font-size:22px;font-weight:700} \
.section{margin-top:22px} .section h2{margin:0 0 10px 0;font-size:17px;font-weight:600} .section h3{margin:0 0 8px 0;font-size:15px} \
.table{width:100%;border-collapse:collapse;background:var(--card);font-size:13px} \
.table th{text-align:left;background:#f3f4f6;padding:6px 8px;border-bottom:1px solid var(--border)} \
.table td{padding:6px 8px;border-bottom:1px solid var(--border)} .null{color:var(--muted);font-style:italic} \
.pill{display:inline-block;background:#eef2f7;padding:3px 9px;border-radius:999px;border:1px solid var(--border);font-size:12px;margin:2px 4px 2px 0} \
.alert{border-left:4px solid var(--warn)} .split{display:grid;grid-template-columns:repeat(2,minmax(0,1fr));gap:12px} \
.hist{display:flex;align-items:flex-end;gap:2px;height:80px} .hist div{flex:1;background:var(--bar);min-height:1px} \
.footer{margin-top:22px;color:var(--muted);font-size:12px} \
@media (max-width:900px){.grid{grid-template-columns:repeat(2,minmax(0,1fr))}.split{grid-template-columns:1fr}}";

/// Render a report as a complete HTML document.
pub fn render_report(report: &ProfileReport) -> String {
    let mut s = String::with_capacity(16 * 1024);
    let title = html_escape(&report.title);

    s.push_str("<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">");
    s.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">");
    s.push_str(&format!("<title>{title}</title><style>{STYLE}</style></head>"));
    s.push_str("<body><div class=\"container\">");
    s.push_str(&format!("<div class=\"title\">{title}</div>"));
    s.push_str(&format!(
        "<div class=\"sub\">Generated {} by {}</div>",
        html_escape(&report.generated_at),
        html_escape(&report.engine)
    ));
    s.push_str("<nav>");
    for (anchor, label) in [
        ("overview", "Overview"),
        ("alerts", "Alerts"),
        ("variables", "Variables"),
        ("correlations", "Correlations"),
        ("missing", "Missing values"),
        ("sample", "Sample"),
    ] {
        s.push_str(&format!("<a href=\"#{anchor}\">{label}</a>"));
    }
    s.push_str("</nav>");

    render_overview(&mut s, report);
    render_alerts(&mut s, report);

    s.push_str("<div class=\"section\" id=\"variables\"><h2>Variables</h2>");
    for variable in &report.variables {
        render_variable(&mut s, variable);
    }
    s.push_str("</div>");

    s.push_str("<div class=\"section\" id=\"correlations\"><h2>Correlations</h2>");
    match &report.correlations {
        Some(matrix) => render_correlations(&mut s, matrix),
        None => s.push_str(
            "<div class=\"card sub\">Not enough numeric columns to compute correlations.</div>",
        ),
    }
    s.push_str("</div>");

    render_missing(&mut s, report);

    s.push_str("<div class=\"section\" id=\"sample\"><h2>Sample</h2><h3>First rows</h3>");
    render_sample(&mut s, &report.head);
    s.push_str("<h3>Last rows</h3>");
    render_sample(&mut s, &report.tail);
    s.push_str("</div>");

    s.push_str(&format!(
        "<div class=\"footer\">Settings: minimal={} explorative={} progress_bar={}</div>",
        report.settings.minimal, report.settings.explorative, report.settings.progress_bar
    ));
    s.push_str("</div></body></html>");
    s
}

fn metric(s: &mut String, label: &str, value: &str) {
    s.push_str(&format!(
        "<div class=\"card metric\"><div class=\"label\">{}</div>\
         <div class=\"value\">{}</div></div>",
        html_escape(label),
        html_escape(value)
    ));
}

fn render_overview(s: &mut String, report: &ProfileReport) {
    let o = &report.overview;
    s.push_str("<div class=\"section\" id=\"overview\"><h2>Overview</h2><div class=\"grid\">");
    metric(s, "Number of variables", &o.columns.to_string());
    metric(s, "Number of observations", &o.rows.to_string());
    metric(
        s,
        "Missing cells",
        &format!("{} ({:.1}%)", o.missing_cells, o.missing_cells_percentage),
    );
    metric(
        s,
        "Duplicate rows",
        &format!("{} ({:.1}%)", o.duplicate_rows, o.duplicate_rows_percentage),
    );
    metric(s, "Total size in memory", &human_bytes(o.estimated_size_bytes));
    s.push_str("</div><div class=\"card\"><h3>Variable types</h3>");
    for (kind, count) in &o.type_counts {
        s.push_str(&format!(
            "<span class=\"pill\">{} · {}</span>",
            kind.display_name(),
            count
        ));
    }
    s.push_str("</div></div>");
}

fn render_alerts(s: &mut String, report: &ProfileReport) {
    s.push_str(&format!(
        "<div class=\"section\" id=\"alerts\"><h2>Alerts ({})</h2>",
        report.alerts.len()
    ));
    if report.alerts.is_empty() {
        s.push_str("<div class=\"card sub\">No alerts.</div>");
    } else {
        s.push_str("<table class=\"table\"><tbody>");
        for alert in &report.alerts {
            s.push_str(&format!(
                "<tr class=\"alert\"><td><span class=\"pill\">{}</span></td><td>{}</td></tr>",
                alert.kind.label(),
                html_escape(&alert.message)
            ));
        }
        s.push_str("</tbody></table>");
    }
    s.push_str("</div>");
}

fn render_variable(s: &mut String, v: &VariableProfile) {
    s.push_str(&format!(
        "<div class=\"card\" id=\"var-{}\"><h3>{} <span class=\"pill\">{}</span>\
         <span class=\"pill\">{}</span></h3><div class=\"split\">",
        html_escape(&v.name),
        html_escape(&v.name),
        v.kind.display_name(),
        html_escape(&v.dtype)
    ));

    s.push_str("<table class=\"table\"><tbody>");
    let mut row = |label: &str, value: String| {
        s.push_str(&format!(
            "<tr><th>{}</th><td>{}</td></tr>",
            label,
            html_escape(&value)
        ));
    };
    row("Distinct", format!("{} ({:.1}%)", v.distinct, v.distinct_percentage));
    row("Missing", format!("{} ({:.1}%)", v.missing, v.missing_percentage));
    row("Memory size", human_bytes(v.memory_bytes));
    if let Some(n) = &v.numeric {
        row("Mean", format_float(n.stats.mean));
        row("Std", n.stats.std.map(format_float).unwrap_or_else(|| "NaN".to_string()));
        row("Minimum", format_float(n.stats.min));
        row("25%", format_float(n.stats.q25));
        row("Median", format_float(n.stats.q50));
        row("75%", format_float(n.stats.q75));
        row("Maximum", format_float(n.stats.max));
        row("Sum", format_float(n.sum));
        row("Zeros", n.zeros.to_string());
        row("Negative", n.negatives.to_string());
        if let Some(skew) = n.skewness {
            row("Skewness", format_float(skew));
        }
        if let Some(kurt) = n.kurtosis {
            row("Kurtosis", format_float(kurt));
        }
        row("Outliers (IQR)", if n.has_outliers { "yes" } else { "no" }.to_string());
    }
    s.push_str("</tbody></table><div>");

    if let Some(n) = &v.numeric
        && !n.histogram.is_empty()
    {
        render_histogram(s, &n.histogram);
    }
    if !v.top_values.is_empty() {
        s.push_str("<table class=\"table\"><thead><tr><th>Value</th><th>Count</th></tr></thead>");
        s.push_str("<tbody>");
        for vc in &v.top_values {
            s.push_str(&format!(
                "<tr><td>{}</td><td>{}</td></tr>",
                html_escape(&vc.value),
                vc.count
            ));
        }
        s.push_str("</tbody></table>");
    }
    s.push_str("</div></div></div>");
}

fn render_histogram(s: &mut String, bins: &[HistogramBin]) {
    let max = bins.iter().map(|b| b.count).max().unwrap_or(0).max(1);
    s.push_str("<div class=\"hist\">");
    for bin in bins {
        let height = bin.count as f64 / max as f64 * 100.0;
        s.push_str(&format!(
            "<div style=\"height:{height:.1}%\" title=\"[{}, {}]: {}\"></div>",
            format_float(bin.lower),
            format_float(bin.upper),
            bin.count
        ));
    }
    s.push_str("</div>");
}

fn render_correlations(s: &mut String, matrix: &CorrelationMatrix) {
    s.push_str("<table class=\"table\"><thead><tr><th></th>");
    for column in &matrix.columns {
        s.push_str(&format!("<th>{}</th>", html_escape(column)));
    }
    s.push_str("</tr></thead><tbody>");
    for (i, column) in matrix.columns.iter().enumerate() {
        s.push_str(&format!("<tr><th>{}</th>", html_escape(column)));
        for value in &matrix.values[i] {
            match value {
                Some(r) => {
                    // blue for positive, red for negative
                    let (red, blue) = if *r >= 0.0 { (0, 200) } else { (200, 0) };
                    s.push_str(&format!(
                        "<td style=\"background:rgba({red},80,{blue},{:.2})\">{r:.3}</td>",
                        r.abs() * 0.6
                    ));
                }
                None => s.push_str("<td class=\"null\">n/a</td>"),
            }
        }
        s.push_str("</tr>");
    }
    s.push_str("</tbody></table>");
}

fn render_missing(s: &mut String, report: &ProfileReport) {
    s.push_str("<div class=\"section\" id=\"missing\"><h2>Missing values</h2>");
    let rows = report.overview.rows.max(1) as f64;
    s.push_str("<table class=\"table\"><thead><tr><th>Column</th><th>Missing</th><th>%</th></tr>");
    s.push_str("</thead><tbody>");
    for column in &report.missing {
        s.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{:.1}%</td></tr>",
            html_escape(&column.column),
            column.nulls,
            column.nulls as f64 / rows * 100.0
        ));
    }
    s.push_str("</tbody></table></div>");
}

fn render_sample(s: &mut String, sample: &TableSample) {
    s.push_str("<table class=\"table\"><thead><tr>");
    for column in &sample.columns {
        s.push_str(&format!("<th>{}</th>", html_escape(column)));
    }
    s.push_str("</tr></thead><tbody>");
    for row in &sample.rows {
        s.push_str("<tr>");
        for cell in row {
            match cell {
                Some(value) => s.push_str(&format!("<td>{}</td>", html_escape(value))),
                None => s.push_str("<td class=\"null\">NaN</td>"),
            }
        }
        s.push_str("</tr>");
    }
    s.push_str("</tbody></table>");
}

/// Byte count as B / KiB / MiB.
fn human_bytes(bytes: usize) -> String {
    const KIB: f64 = 1024.0;
    let b = bytes as f64;
    if b < KIB {
        format!("{bytes} B")
    } else if b < KIB * KIB {
        format!("{:.1} KiB", b / KIB)
    } else {
        format!("{:.1} MiB", b / (KIB * KIB))
    }
}
