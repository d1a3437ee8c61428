use crate::report::{SummaryData, format_number};

pub fn render_report_text(data: &SummaryData) -> String {
    let mut out = String::new();

    out.push_str("PPC Risk Scoring Report\n");
    out.push_str("=======================\n\n");

    out.push_str("1. Inputs\n");
    out.push_str(&format!("Leads: {} ({} rows)\n", data.input.leads, data.counts.leads));
    out.push_str(&format!(
        "Branches: {} ({} rows, {} with coordinates)\n",
        data.input.branches, data.counts.branches, data.counts.branches_with_coordinates
    ));
    out.push_str(&format!("Geocoder: {}\n\n", data.input.geocoder_url));

    out.push_str("2. Location\n");
    out.push_str(&format!(
        "Postcodes geocoded: {}/{}\n",
        data.counts.geocoded, data.counts.postcodes_looked_up
    ));
    out.push_str(&format!(
        "Leads matched to a branch: {}/{}\n\n",
        data.counts.nearest_branch_found, data.counts.leads
    ));

    out.push_str("3. Risk score\n");
    out.push_str(&format!(
        "Leads scored: {}/{}\n",
        data.counts.scored, data.counts.leads
    ));
    out.push_str(&format!(
        "Risk Score Average: {}\n",
        optional(data.risk_score.average)
    ));
    out.push_str(&format!(
        "Range: {} .. {}\n\n",
        optional(data.risk_score.min),
        optional(data.risk_score.max)
    ));

    out.push_str("4. Not computable\n");
    let nc = &data.not_computable;
    out.push_str(&format!("NCD years: {}\n", nc.ncd));
    out.push_str(&format!("Age: {}\n", nc.age));
    out.push_str(&format!("Vehicle value: {}\n", nc.vehicle_value));
    out.push_str(&format!("Branch distance: {}\n", nc.address));
    out.push_str(&format!("Total: {}\n", nc.total));

    out
}

fn optional(v: Option<f64>) -> String {
    v.map(format_number).unwrap_or_else(|| "n/a".to_string())
}
