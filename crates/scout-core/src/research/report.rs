use super::{CompanyInfo, ResearchState};

impl ResearchState {
    /// Converts a finished run to markdown for display.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!("# Results for: {}\n\n", self.query()));

        if self.companies.is_empty() {
            md.push_str("No tools could be researched for this query.\n\n");
        }

        for (i, company) in self.companies.iter().enumerate() {
            md.push_str(&format!("## {}. {}\n\n", i + 1, company.name));
            push_company(&mut md, company);
        }

        if let Some(analysis) = &self.analysis {
            md.push_str("## Developer Recommendations\n\n");
            md.push_str(analysis.trim());
            md.push_str("\n\n");
        }

        if !self.search_results.is_empty() {
            md.push_str("## Sources\n\n");
            for result in &self.search_results {
                match result.display_title() {
                    Some(title) => md.push_str(&format!("- [{}]({})\n", title, result.url)),
                    None => md.push_str(&format!("- {}\n", result.url)),
                }
            }
            md.push('\n');
        }

        if !self.failures.is_empty() {
            md.push_str("## Issues\n\n");
            for failure in &self.failures {
                md.push_str(&format!(
                    "- {}: {}\n",
                    failure.stage.display_name(),
                    failure.message
                ));
            }
            md.push('\n');
        }

        md
    }
}

fn push_company(md: &mut String, company: &CompanyInfo) {
    md.push_str(&format!("- **Website:** {}\n", company.website));

    if let Some(pricing) = &company.pricing_model {
        md.push_str(&format!("- **Pricing:** {}\n", pricing));
    }
    if let Some(open_source) = company.is_open_source {
        let label = if open_source { "Open Source" } else { "Proprietary" };
        md.push_str(&format!("- **Open Source:** {}\n", label));
    }
    push_list(md, "Tech Stack", &company.tech_stack, 5);
    push_list(md, "Language Support", &company.language_support, 5);
    if let Some(api) = company.api_available {
        let label = if api { "Available" } else { "Not Available" };
        md.push_str(&format!("- **API:** {}\n", label));
    }
    push_list(md, "Integrations", &company.integration_capabilities, 4);
    push_list(md, "Competitors", &company.competitors, 5);
    if let Some(rating) = company.developer_experience_rating {
        md.push_str(&format!("- **Developer Experience:** {}\n", rating.as_str()));
    }

    if !company.description.is_empty() {
        md.push('\n');
        md.push_str(&company.description);
        md.push('\n');
    }
    md.push('\n');
}

fn push_list(md: &mut String, label: &str, items: &[String], limit: usize) {
    if items.is_empty() {
        return;
    }
    let shown: Vec<&str> = items.iter().take(limit).map(String::as_str).collect();
    md.push_str(&format!("- **{}:** {}\n", label, shown.join(", ")));
}
