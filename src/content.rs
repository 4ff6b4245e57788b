//! Static site copy and the case-study store, parsed and validated once from
//! the JSON embedded at build time.

use crate::config::{RawSettings, SiteConfig};
use crate::router::View;
use serde::Deserialize;
use std::collections::HashMap;
use thiserror::Error;
use url::Url;

const SITE_JSON: &str = include_str!("../content/site.json");
const PROJECTS_JSON: &str = include_str!("../content/projects.json");
const NO_LIVE_SITE: &str = "#";

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("content is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("project identifier is empty")]
    EmptyId,
    #[error("duplicate project identifier `{0}`")]
    DuplicateId(String),
    #[error("project `{id}` has an empty `{field}`")]
    EmptyField { id: String, field: &'static str },
    #[error("project `{id}` has no {field}")]
    EmptyList { id: String, field: &'static str },
    #[error("`{value}` in {context} is not a valid {expected} URL")]
    InvalidUrl {
        context: String,
        value: String,
        expected: &'static str,
    },
    #[error("portfolio lists unknown project `{0}`")]
    UnknownPortfolioProject(String),
    #[error("site section `{0}` is empty")]
    EmptySection(&'static str),
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResultMetric {
    pub metric: String,
    pub description: String,
}

/// One completed client project. Every field is required.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProjectCaseStudy {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub client: String,
    pub category: String,
    pub date: String,
    pub live_url: String,
    pub images: Vec<String>,
    pub challenge: String,
    pub solution: String,
    pub results: Vec<ResultMetric>,
    pub reflection: String,
    pub technologies: Vec<String>,
    pub description: String,
}

impl ProjectCaseStudy {
    pub fn cover_image(&self) -> &str {
        self.images.first().map(String::as_str).unwrap_or_default()
    }

    pub fn has_live_site(&self) -> bool {
        self.live_url != NO_LIVE_SITE
    }

    pub fn document_title(&self, site_name: &str) -> String {
        format!("{} | {site_name} - Développeur Web", self.title)
    }

    fn validate(&self) -> Result<(), ContentError> {
        if self.id.trim().is_empty() {
            return Err(ContentError::EmptyId);
        }

        let text_fields = [
            ("title", &self.title),
            ("subtitle", &self.subtitle),
            ("client", &self.client),
            ("category", &self.category),
            ("date", &self.date),
            ("challenge", &self.challenge),
            ("solution", &self.solution),
            ("reflection", &self.reflection),
            ("description", &self.description),
        ];
        for (field, value) in text_fields {
            if value.trim().is_empty() {
                return Err(ContentError::EmptyField {
                    id: self.id.clone(),
                    field,
                });
            }
        }

        if self.images.is_empty() {
            return Err(self.empty_list("images"));
        }
        if self.results.is_empty() {
            return Err(self.empty_list("results"));
        }
        if self.technologies.is_empty() {
            return Err(self.empty_list("technologies"));
        }

        let context = format!("project `{}`", self.id);
        for image in &self.images {
            ensure_web_url(&context, image)?;
        }
        if self.has_live_site() {
            ensure_web_url(&context, &self.live_url)?;
        }

        for result in &self.results {
            if result.metric.trim().is_empty() || result.description.trim().is_empty() {
                return Err(ContentError::EmptyField {
                    id: self.id.clone(),
                    field: "results",
                });
            }
        }

        if self.technologies.iter().any(|tag| tag.trim().is_empty()) {
            return Err(ContentError::EmptyField {
                id: self.id.clone(),
                field: "technologies",
            });
        }

        Ok(())
    }

    fn empty_list(&self, field: &'static str) -> ContentError {
        ContentError::EmptyList {
            id: self.id.clone(),
            field,
        }
    }
}

fn ensure_url_with_schemes(
    context: &str,
    value: &str,
    schemes: &[&str],
    expected: &'static str,
) -> Result<Url, ContentError> {
    Url::parse(value)
        .ok()
        .filter(|url| schemes.contains(&url.scheme()))
        .ok_or_else(|| ContentError::InvalidUrl {
            context: context.to_string(),
            value: value.to_string(),
            expected,
        })
}

fn ensure_web_url(context: &str, value: &str) -> Result<Url, ContentError> {
    ensure_url_with_schemes(context, value, &["http", "https"], "http(s)")
}

/// Read-only map from project identifier to case study, in authoring order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContentStore {
    projects: Vec<ProjectCaseStudy>,
    by_id: HashMap<String, usize>,
}

impl ContentStore {
    pub fn from_records(projects: Vec<ProjectCaseStudy>) -> Result<Self, ContentError> {
        let mut by_id = HashMap::with_capacity(projects.len());

        for (index, project) in projects.iter().enumerate() {
            project.validate()?;
            if by_id.insert(project.id.clone(), index).is_some() {
                return Err(ContentError::DuplicateId(project.id.clone()));
            }
        }

        Ok(Self { projects, by_id })
    }

    pub fn from_json(json: &str) -> Result<Self, ContentError> {
        let projects: Vec<ProjectCaseStudy> = serde_json::from_str(json)?;
        Self::from_records(projects)
    }

    pub fn lookup(&self, id: &str) -> Option<&ProjectCaseStudy> {
        self.by_id.get(id).and_then(|index| self.projects.get(*index))
    }

    #[cfg(test)]
    pub fn projects(&self) -> impl Iterator<Item = &ProjectCaseStudy> {
        self.projects.iter()
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub name: String,
    pub role: String,
    pub site_title: String,
    pub site_description: String,
    pub location: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hero {
    pub headline: String,
}

impl Hero {
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.headline.split_whitespace()
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paragraph {
    #[serde(default)]
    pub highlight: Option<String>,
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stat {
    pub value: String,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct About {
    pub portrait_url: String,
    pub heading: String,
    pub paragraphs: Vec<Paragraph>,
    pub stats: Vec<Stat>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Technology {
    pub name: String,
    pub logo_url: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechStack {
    pub eyebrow: String,
    pub lead: String,
    pub highlight: String,
    pub items: Vec<Technology>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceIcon {
    Layers,
    ShoppingCart,
    Code,
    PenTool,
    Settings,
    Shield,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceCard {
    pub title: String,
    pub description: String,
    pub icon: ServiceIcon,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Services {
    pub heading: String,
    pub accent: String,
    pub hint: String,
    pub cards: Vec<ServiceCard>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reasons {
    pub heading: Vec<String>,
    pub items: Vec<String>,
    pub closing: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    pub heading: String,
    pub project_ids: Vec<String>,
    pub archive_url: String,
    pub archive_label: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    pub quote: String,
    pub author: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimonials {
    pub year: String,
    pub items: Vec<Testimonial>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub heading: String,
    pub intro: String,
    pub phone_label: String,
    pub whatsapp_url: String,
    pub email_url: String,
    pub email_label: String,
    pub response_note: String,
    pub footer: Vec<String>,
    pub legal_label: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegalItem {
    #[serde(default)]
    pub label: Option<String>,
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum LegalBlock {
    Paragraph { text: String },
    List { items: Vec<LegalItem> },
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegalSection {
    pub heading: String,
    pub blocks: Vec<LegalBlock>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegalNotice {
    pub title: String,
    pub sections: Vec<LegalSection>,
}

/// Everything on the site that is not a case study.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteCopy {
    pub identity: Identity,
    pub hero: Hero,
    pub about: About,
    pub tech_stack: TechStack,
    pub services: Services,
    pub reasons: Reasons,
    pub portfolio: Portfolio,
    pub testimonials: Testimonials,
    pub contact: Contact,
    pub legal: LegalNotice,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SiteDocument {
    #[serde(default)]
    settings: RawSettings,
    #[serde(flatten)]
    copy: SiteCopy,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Site {
    pub config: SiteConfig,
    pub copy: SiteCopy,
    pub projects: ContentStore,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    pub image: String,
}

impl Site {
    pub fn builtin() -> Result<Self, ContentError> {
        Self::from_json(SITE_JSON, PROJECTS_JSON)
    }

    pub fn from_json(site_json: &str, projects_json: &str) -> Result<Self, ContentError> {
        let document: SiteDocument = serde_json::from_str(site_json)?;
        let projects = ContentStore::from_json(projects_json)?;
        let site = Self {
            config: SiteConfig::from_raw(&document.settings),
            copy: document.copy,
            projects,
        };
        site.validate()?;

        Ok(site)
    }

    /// Document title and share tags for a view. Unknown project ids get the
    /// site-wide values, like home and the legal notice.
    pub fn page_meta(&self, view: &View) -> PageMeta {
        let identity = &self.copy.identity;

        if let View::ProjectDetail(id) = view {
            match self.projects.lookup(id) {
                Some(project) => {
                    return PageMeta {
                        title: project.document_title(&identity.name),
                        description: project.description.clone(),
                        image: project.cover_image().to_string(),
                    }
                }
                None => log::warn!("no case study for project id `{id}`"),
            }
        }

        PageMeta {
            title: identity.site_title.clone(),
            description: identity.site_description.clone(),
            image: self.copy.about.portrait_url.clone(),
        }
    }

    /// Case studies shown on the home page grid, in display order.
    pub fn portfolio(&self) -> impl Iterator<Item = &ProjectCaseStudy> {
        self.copy
            .portfolio
            .project_ids
            .iter()
            .filter_map(|id| self.projects.lookup(id))
    }

    fn validate(&self) -> Result<(), ContentError> {
        let copy = &self.copy;

        if copy.services.cards.is_empty() {
            return Err(ContentError::EmptySection("services"));
        }
        if copy.testimonials.items.is_empty() {
            return Err(ContentError::EmptySection("testimonials"));
        }
        if copy.portfolio.project_ids.is_empty() {
            return Err(ContentError::EmptySection("portfolio"));
        }
        if copy.tech_stack.items.is_empty() {
            return Err(ContentError::EmptySection("techStack"));
        }

        if let Some(unknown) = copy
            .portfolio
            .project_ids
            .iter()
            .find(|id| self.projects.lookup(id).is_none())
        {
            return Err(ContentError::UnknownPortfolioProject(unknown.clone()));
        }

        ensure_web_url("about", &copy.about.portrait_url)?;
        ensure_web_url("portfolio", &copy.portfolio.archive_url)?;
        for technology in &copy.tech_stack.items {
            ensure_web_url("techStack", &technology.logo_url)?;
        }
        ensure_web_url("contact", &copy.contact.whatsapp_url)?;
        ensure_url_with_schemes("contact", &copy.contact.email_url, &["mailto"], "mailto")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builtin() -> Site {
        Site::builtin().expect("embedded content should validate")
    }

    fn sample_project(id: &str) -> ProjectCaseStudy {
        ProjectCaseStudy {
            id: id.to_string(),
            title: "Title".to_string(),
            subtitle: "Subtitle".to_string(),
            client: "Client".to_string(),
            category: "Category".to_string(),
            date: "Mars 2024".to_string(),
            live_url: "https://example.com/".to_string(),
            images: vec!["https://example.com/cover.jpg".to_string()],
            challenge: "Challenge".to_string(),
            solution: "Solution".to_string(),
            results: vec![ResultMetric {
                metric: "+10%".to_string(),
                description: "Trafic".to_string(),
            }],
            reflection: "Reflection".to_string(),
            technologies: vec!["Rust".to_string()],
            description: "Description".to_string(),
        }
    }

    #[test]
    fn every_stored_project_is_complete() {
        let site = builtin();
        assert_eq!(site.projects.len(), 6);

        for project in site.projects.projects() {
            let found = site.projects.lookup(&project.id).expect("stored id resolves");
            assert_eq!(found, project);
            assert!(!found.images.is_empty());
            assert!(!found.cover_image().is_empty());
            assert!(!found.results.is_empty());
            assert!(!found.technologies.is_empty());
            assert!(!found.reflection.trim().is_empty());
        }
    }

    #[test]
    fn unknown_identifier_is_not_found() {
        let site = builtin();

        assert!(site.projects.lookup("unknown-project").is_none());
        assert!(site.projects.lookup("").is_none());
    }

    #[test]
    fn portfolio_resolves_in_display_order() {
        let site = builtin();
        let ids: Vec<&str> = site.portfolio().map(|project| project.id.as_str()).collect();

        let expected: Vec<&str> = site
            .copy
            .portfolio
            .project_ids
            .iter()
            .map(String::as_str)
            .collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn builtin_settings_and_copy_are_loaded() {
        let site = builtin();

        assert_eq!(site.config.testimonial_interval_ms, 5_000);
        assert_eq!(site.copy.testimonials.items.len(), 3);
        assert_eq!(site.copy.services.cards.len(), 6);
        assert!(site.copy.hero.words().count() > 1);
        assert!(!site.copy.legal.sections.is_empty());
    }

    #[test]
    fn duplicate_identifiers_are_rejected() {
        let result = ContentStore::from_records(vec![sample_project("a"), sample_project("a")]);

        assert!(matches!(result, Err(ContentError::DuplicateId(id)) if id == "a"));
    }

    #[test]
    fn records_without_images_are_rejected() {
        let mut project = sample_project("a");
        project.images.clear();

        let result = ContentStore::from_records(vec![project]);
        assert!(matches!(result, Err(ContentError::EmptyList { field: "images", .. })));
    }

    #[test]
    fn blank_narrative_is_rejected() {
        let mut project = sample_project("a");
        project.reflection = "   ".to_string();

        let result = ContentStore::from_records(vec![project]);
        assert!(matches!(result, Err(ContentError::EmptyField { field: "reflection", .. })));
    }

    #[test]
    fn missing_field_fails_to_parse() {
        let json = r#"[{"id": "a", "title": "A"}]"#;

        assert!(matches!(ContentStore::from_json(json), Err(ContentError::Json(_))));
    }

    #[test]
    fn placeholder_live_url_is_allowed_but_garbage_is_not() {
        let mut placeholder = sample_project("a");
        placeholder.live_url = "#".to_string();
        let store = ContentStore::from_records(vec![placeholder]).expect("placeholder is allowed");
        assert!(!store.lookup("a").expect("stored").has_live_site());

        let mut broken = sample_project("b");
        broken.live_url = "www.example.com".to_string();
        assert!(matches!(
            ContentStore::from_records(vec![broken]),
            Err(ContentError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn portfolio_with_unknown_project_is_rejected() {
        let mut document: serde_json::Value =
            serde_json::from_str(SITE_JSON).expect("embedded site JSON parses");
        document["portfolio"]["projectIds"] = serde_json::json!(["creaboite", "ghost"]);

        let result = Site::from_json(&document.to_string(), PROJECTS_JSON);
        assert!(matches!(result, Err(ContentError::UnknownPortfolioProject(id)) if id == "ghost"));
    }

    #[test]
    fn leaving_a_case_study_restores_site_meta() {
        let site = builtin();
        let project = site.projects.lookup("creaboite").expect("creaboite is stored");

        let detail = site.page_meta(&View::ProjectDetail("creaboite".to_string()));
        assert_eq!(detail.image, project.cover_image());
        assert_eq!(detail.title, project.document_title(&site.copy.identity.name));

        for view in [
            View::Home,
            View::LegalNotice,
            View::ProjectDetail("missing".to_string()),
        ] {
            let meta = site.page_meta(&view);
            assert_eq!(meta.title, site.copy.identity.site_title);
            assert_eq!(meta.description, site.copy.identity.site_description);
            assert_eq!(meta.image, site.copy.about.portrait_url);
        }
    }

    #[test]
    fn host_page_starts_with_the_site_meta() {
        let site = builtin();
        let index = include_str!("../index.html");
        let identity = &site.copy.identity;

        assert!(index.contains(&format!("<title>{}</title>", identity.site_title)));
        assert!(index.contains(&format!(
            "<meta property=\"og:title\" content=\"{}\" />",
            identity.site_title
        )));
        assert!(index.contains(&format!(
            "<meta name=\"description\" content=\"{}\" />",
            identity.site_description
        )));
        assert!(index.contains(&format!(
            "<meta property=\"og:image\" content=\"{}\" />",
            site.copy.about.portrait_url
        )));
    }

    #[test]
    fn document_title_names_the_project() {
        let project = sample_project("a");

        assert_eq!(
            project.document_title("Antoine Rousseau"),
            "Title | Antoine Rousseau - Développeur Web"
        );
    }
}
