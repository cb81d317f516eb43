// src/web/render.rs
//
// Server-rendered dashboard: one page with the location filter, the offers
// table, the per-company table, and the distribution bar charts.

use crate::analysis::JobAggregation;
use crate::itjobs::LocationInfo;
use std::collections::HashMap;

pub fn escape_html(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn sorted_desc(map: &HashMap<String, u32>) -> Vec<(String, u32)> {
    let mut pairs: Vec<(String, u32)> = map.iter().map(|(k, v)| (k.clone(), *v)).collect();
    pairs.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    pairs
}

/// Horizontal CSS bar chart, widths scaled to the largest count.
fn bar_chart(heading: &str, pairs: &[(String, u32)]) -> String {
    if pairs.is_empty() {
        return format!(
            "<section><h3>{}</h3><p class=\"empty\">No data.</p></section>\n",
            escape_html(heading)
        );
    }

    let max = pairs.iter().map(|(_, c)| *c).max().unwrap_or(1).max(1);
    let mut out = format!("<section><h3>{}</h3><div class=\"chart\">\n", escape_html(heading));
    for (label, count) in pairs {
        let width = (*count as f64 / max as f64 * 100.0).round() as u32;
        out.push_str(&format!(
            "<div class=\"bar-row\"><span class=\"bar-label\">{}</span>\
             <span class=\"bar\" style=\"width:{}%\"></span>\
             <span class=\"bar-count\">{}</span></div>\n",
            escape_html(label),
            width.max(1),
            count
        ));
    }
    out.push_str("</div></section>\n");
    out
}

fn location_selector(locations: &[LocationInfo], selected: Option<u32>) -> String {
    let mut options = String::from("<option value=\"\">All</option>\n");
    for location in locations {
        let marker = if selected == Some(location.id) {
            " selected"
        } else {
            ""
        };
        options.push_str(&format!(
            "<option value=\"{}\"{}>{}</option>\n",
            location.id,
            marker,
            escape_html(&location.name)
        ));
    }

    format!(
        "<form method=\"get\" action=\"/\">\
         <label for=\"location\">Select a location</label>\n\
         <select id=\"location\" name=\"location\" onchange=\"this.form.submit()\">\n{}</select>\n\
         <noscript><button type=\"submit\">Apply</button></noscript>\
         </form>\n",
        options
    )
}

fn offers_table(agg: &JobAggregation) -> String {
    let mut out = String::from("<table id=\"offers\"><thead><tr>");
    for (index, heading) in ["Job Title", "Company", "Offer", "Date Posted", "Allow Remote"]
        .iter()
        .enumerate()
    {
        out.push_str(&format!(
            "<th class=\"sortable\" onclick=\"sortOffers({})\">{}</th>",
            index, heading
        ));
    }
    out.push_str("</tr></thead><tbody>\n");
    for row in &agg.rows {
        out.push_str(&format!(
            "<tr><td>{}</td><td>{}</td>\
             <td><a href=\"{}\" target=\"_blank\">🔗 Link</a></td>\
             <td>{}</td><td>{}</td></tr>\n",
            escape_html(&row.title),
            escape_html(&row.company),
            escape_html(&row.link),
            escape_html(&row.date_posted),
            row.allow_remote
        ));
    }
    out.push_str("</tbody></table>\n");
    out
}

fn company_table(agg: &JobAggregation) -> String {
    let counts = agg.sorted_company_counts();
    let mut out = format!(
        "<section><h3>{} unique companies</h3>\
         <table><thead><tr><th>Company</th><th>Number of Offers</th></tr></thead><tbody>\n",
        counts.len()
    );
    for (name, count) in &counts {
        out.push_str(&format!(
            "<tr><td>{}</td><td>{}</td></tr>\n",
            escape_html(name),
            count
        ));
    }
    out.push_str("</tbody></table></section>\n");
    out
}

/// Assemble the full dashboard page. The location chart only renders when no
/// location filter is applied; an empty pass renders the no-jobs notice.
pub fn render_dashboard(
    locations: &[LocationInfo],
    selected: Option<u32>,
    agg: &JobAggregation,
    warning: Option<&str>,
) -> String {
    let mut body = String::new();

    body.push_str("<h1>IT Jobs Analyzer 🕵️💻</h1>\n");
    body.push_str(
        "<p class=\"caption\">Search, analyze, and extract insight from \
         Portugal's IT job market, powered by \
         <a href=\"https://www.itjobs.pt/\" target=\"_blank\">ITJobs</a>.</p>\n",
    );

    if let Some(message) = warning {
        body.push_str(&format!(
            "<p class=\"warning\">{}</p>\n",
            escape_html(message)
        ));
    }

    body.push_str(&location_selector(locations, selected));

    if agg.is_empty() {
        body.push_str("<p class=\"warning\">No jobs found.</p>\n");
    } else {
        body.push_str(&format!("<h3>{} offer(s) found</h3>\n", agg.total));
        body.push_str(&offers_table(agg));
        body.push_str(&company_table(agg));

        if selected.is_none() {
            body.push_str(&bar_chart(
                "Location Distribution",
                &sorted_desc(&agg.location_distribution),
            ));
        }

        let remote_pairs = vec![
            ("Remote".to_string(), agg.remote_count),
            ("Non-Remote".to_string(), agg.non_remote_count),
        ];
        body.push_str(&bar_chart("Remote vs Non-Remote Jobs", &remote_pairs));
        body.push_str(&bar_chart(
            "Technology Distribution",
            &sorted_desc(&agg.tech_distribution),
        ));
        body.push_str(&bar_chart(
            "Role Distribution",
            &sorted_desc(&agg.role_distribution),
        ));
    }

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>IT Jobs Analyzer</title>\n<style>{}</style>\n</head>\n\
         <body>\n{}<script>{}</script>\n</body>\n</html>\n",
        STYLESHEET, body, SORT_SCRIPT
    )
}

/// Click-to-sort for the offers table. Repeated clicks on the same column
/// flip the direction; numeric-aware compare keeps dates and ids sensible.
const SORT_SCRIPT: &str = "\
function sortOffers(col){\
var table=document.getElementById('offers');\
if(!table){return;}\
var tbody=table.tBodies[0];\
var rows=Array.prototype.slice.call(tbody.rows);\
var key=col+':asc';\
var dir=table.getAttribute('data-sort')===key?-1:1;\
table.setAttribute('data-sort',dir===1?key:col+':desc');\
rows.sort(function(a,b){\
var x=a.cells[col].textContent.trim();\
var y=b.cells[col].textContent.trim();\
return dir*x.localeCompare(y,undefined,{numeric:true});\
});\
rows.forEach(function(row){tbody.appendChild(row);});\
}";

const STYLESHEET: &str = "\
body{font-family:sans-serif;margin:2rem auto;max-width:60rem;padding:0 1rem}\
table{border-collapse:collapse;width:100%;margin:1rem 0}\
th,td{border:1px solid #ddd;padding:.4rem .6rem;text-align:left}\
th{background:#f5f5f5}\
th.sortable{cursor:pointer}\
.caption{color:#666}\
.warning{background:#fff3cd;border:1px solid #ffe69c;padding:.6rem 1rem}\
.chart{margin:.5rem 0}\
.bar-row{display:flex;align-items:center;margin:.2rem 0}\
.bar-label{flex:0 0 14rem;overflow:hidden;text-overflow:ellipsis;white-space:nowrap}\
.bar{background:#4a90d9;height:1rem;display:inline-block}\
.bar-count{margin-left:.4rem;color:#444}\
select{margin:.5rem 0;padding:.3rem}";
