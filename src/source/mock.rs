//! Synthetic article catalogue.
//!
//! Articles are generated deterministically from their index so that a
//! given catalogue size always produces the same cards, heights and layout.
//! Excerpt lengths cycle through short, medium and long to give the masonry
//! grid something to balance.

use super::{slice_page, PageSource};
use crate::model::{Article, ArticleId, FetchError, Page, PageNumber};
use chrono::{DateTime, Duration as ChronoDuration, TimeZone, Utc};
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

const CATEGORIES: [&str; 8] = [
    "Technology",
    "Design",
    "Business",
    "Science",
    "Travel",
    "Food",
    "Health",
    "Art",
];

const AUTHORS: [&str; 6] = [
    "John Doe",
    "Jane Smith",
    "Alex Johnson",
    "Sarah Wilson",
    "Mike Brown",
    "Emily Davis",
];

const TITLES: [&str; 15] = [
    "The Future of Web Development",
    "Design Trends for 2024",
    "Building Scalable Applications",
    "Understanding User Experience",
    "Modern JavaScript Frameworks",
    "CSS Grid vs Flexbox",
    "API Design Best Practices",
    "Mobile-First Development",
    "Performance Optimization Tips",
    "Accessibility in Web Design",
    "State Management Solutions",
    "Testing Strategies",
    "DevOps for Frontend",
    "Progressive Web Apps",
    "Micro-Frontend Architecture",
];

const TAGS: [&str; 10] = [
    "react",
    "javascript",
    "css",
    "design",
    "ux",
    "frontend",
    "backend",
    "api",
    "mobile",
    "performance",
];

const IMAGES: [&str; 8] = [
    "https://images.unsplash.com/photo-1498050108023-c5249f4df085?w=400&h=300&fit=crop",
    "https://images.unsplash.com/photo-1461749280684-dccba630e2f6?w=400&h=300&fit=crop",
    "https://images.unsplash.com/photo-1486312338219-ce68d2c6f44d?w=400&h=300&fit=crop",
    "https://images.unsplash.com/photo-1504384308090-c894fdcc538d?w=400&h=300&fit=crop",
    "https://images.unsplash.com/photo-1581091226825-a6a2a5aee158?w=400&h=300&fit=crop",
    "https://images.unsplash.com/photo-1517077304055-6e89abbf09b0?w=400&h=300&fit=crop",
    "https://images.unsplash.com/photo-1542831371-29b0f74f9713?w=400&h=300&fit=crop",
    "https://images.unsplash.com/photo-1558618666-fcd25c85cd64?w=400&h=300&fit=crop",
];

const SHORT_EXCERPTS: [&str; 4] = [
    "A brief introduction to modern web development practices.",
    "Quick tips for better design.",
    "Essential business strategies.",
    "Latest scientific discoveries.",
];

const MEDIUM_EXCERPTS: [&str; 4] = [
    "Exploring the latest trends in technology and how they impact our daily lives. From artificial intelligence to blockchain, these innovations are reshaping industries.",
    "Design principles that create meaningful user experiences. Understanding color theory, typography, and layout fundamentals for better visual communication.",
    "Building sustainable business models in the digital age. Strategies for growth, customer retention, and market expansion in competitive environments.",
    "Scientific breakthroughs that are changing our understanding of the world. From quantum computing to genetic engineering, research continues to push boundaries.",
];

const LONG_EXCERPTS: [&str; 3] = [
    "In-depth analysis of emerging technologies and their potential impact on society. This comprehensive guide covers everything from machine learning algorithms to sustainable energy solutions. We explore how these innovations are not only changing industries but also creating new opportunities for entrepreneurs and established businesses alike.",
    "A complete guide to modern design thinking and user experience principles. This article delves into the psychology of design, exploring how colors, shapes, and layouts influence user behavior. We examine case studies from successful companies and provide practical tips for implementing design systems that scale.",
    "Strategic business planning for the next decade. As markets evolve and consumer preferences shift, companies must adapt their strategies to remain relevant. This comprehensive analysis covers market research, competitive analysis, and strategic planning methodologies.",
];

const SENTENCES: [&str; 8] = [
    "Technology continues to evolve at an unprecedented pace.",
    "Innovation drives progress in every industry.",
    "Understanding user needs is crucial for success.",
    "Data-driven decisions lead to better outcomes.",
    "Collaboration enhances creativity and productivity.",
    "Sustainable practices are becoming increasingly important.",
    "Digital transformation affects all aspects of business.",
    "Continuous learning is essential in today's world.",
];

/// Excerpt length class; drives card height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentLength {
    /// One line teaser.
    Short,
    /// A couple of sentences.
    Medium,
    /// A full paragraph.
    Long,
}

impl ContentLength {
    /// Roughly 30% short, 40% medium, 30% long across consecutive indices.
    fn for_index(index: usize) -> Self {
        match (index * 7 + 3) % 10 {
            0..=2 => ContentLength::Short,
            3..=6 => ContentLength::Medium,
            _ => ContentLength::Long,
        }
    }

    fn excerpt(&self, index: usize) -> &'static str {
        match self {
            ContentLength::Short => SHORT_EXCERPTS[index % SHORT_EXCERPTS.len()],
            ContentLength::Medium => MEDIUM_EXCERPTS[index % MEDIUM_EXCERPTS.len()],
            ContentLength::Long => LONG_EXCERPTS[index % LONG_EXCERPTS.len()],
        }
    }

    fn paragraphs(&self) -> usize {
        match self {
            ContentLength::Short => 2,
            ContentLength::Medium => 4,
            ContentLength::Long => 8,
        }
    }
}

fn catalogue_epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0)
        .single()
        .unwrap_or_default()
}

fn body_text(index: usize, length: ContentLength) -> String {
    (0..length.paragraphs())
        .map(|paragraph| {
            let sentences = 3 + (index + paragraph) % 4;
            (0..sentences)
                .map(|s| SENTENCES[(index * 3 + paragraph * 5 + s) % SENTENCES.len()])
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn tags_for(index: usize) -> Vec<String> {
    let count = 2 + index % 3;
    (0..count)
        .map(|offset| TAGS[(index * 3 + offset) % TAGS.len()].to_string())
        .collect()
}

/// Build article number `index` (0-based) of the synthetic catalogue.
///
/// The id is `index + 1`, matching 1-based display numbering.
pub fn article_at(index: usize) -> Article {
    let length = ContentLength::for_index(index);
    let hours_back = (index as i64 * 13) % (30 * 24);
    Article {
        id: ArticleId::from_index(index),
        title: TITLES[(index * 4) % TITLES.len()].to_string(),
        excerpt: length.excerpt(index / 3).to_string(),
        content: body_text(index, length),
        author: AUTHORS[(index * 5) % AUTHORS.len()].to_string(),
        published_at: catalogue_epoch() - ChronoDuration::hours(hours_back),
        image_url: IMAGES[index % IMAGES.len()].to_string(),
        category: CATEGORIES[(index * 3) % CATEGORIES.len()].to_string(),
        read_time_minutes: 2 + ((index * 7) % 10) as u32,
        tags: tags_for(index),
    }
}

/// Generate the first `count` articles of the catalogue.
pub fn generate_articles(count: usize) -> Vec<Article> {
    (0..count).map(article_at).collect()
}

/// Make one page fail a fixed number of times before it succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FailurePlan {
    /// Page that fails.
    pub page: PageNumber,
    /// How many attempts fail before the page is served.
    pub attempts: u32,
}

impl FailurePlan {
    /// Fail `page` on its first `attempts` fetches.
    pub fn new(page: PageNumber, attempts: u32) -> Self {
        Self { page, attempts }
    }
}

/// Simulated blog API over the synthetic catalogue.
///
/// # Examples
///
/// ```
/// use masonry_feed::model::PageNumber;
/// use masonry_feed::source::{MockArticleSource, PageSource};
///
/// let mut source = MockArticleSource::new(50, 12);
/// let last = source.fetch_page(PageNumber::new(5).unwrap()).unwrap();
/// assert_eq!(last.items.len(), 2);
/// assert!(!last.has_more);
/// ```
#[derive(Debug, Clone)]
pub struct MockArticleSource {
    articles: Vec<Article>,
    page_size: usize,
    initial_latency: Duration,
    latency: Duration,
    failure: Option<FailurePlan>,
    failures_served: u32,
}

impl MockArticleSource {
    /// Catalogue of `total` articles served `page_size` at a time, no latency.
    pub fn new(total: usize, page_size: usize) -> Self {
        Self {
            articles: generate_articles(total),
            page_size: page_size.max(1),
            initial_latency: Duration::ZERO,
            latency: Duration::ZERO,
            failure: None,
            failures_served: 0,
        }
    }

    /// Sleep `initial` before serving the first page and `subsequent`
    /// before every other page.
    pub fn with_latency(mut self, initial: Duration, subsequent: Duration) -> Self {
        self.initial_latency = initial;
        self.latency = subsequent;
        self
    }

    /// Inject failures for one page.
    pub fn with_failure(mut self, plan: FailurePlan) -> Self {
        self.failure = Some(plan);
        self.failures_served = 0;
        self
    }

    /// Number of articles in the catalogue.
    pub fn total(&self) -> usize {
        self.articles.len()
    }

    /// Items per page.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// The full catalogue.
    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    /// Delay served before `page`.
    pub fn latency_for(&self, page: PageNumber) -> Duration {
        if page == PageNumber::FIRST {
            self.initial_latency
        } else {
            self.latency
        }
    }

    fn injected_failure(&mut self, page: PageNumber) -> Option<FetchError> {
        let plan = self.failure?;
        if plan.page != page || self.failures_served >= plan.attempts {
            return None;
        }
        self.failures_served += 1;
        Some(FetchError::Unavailable {
            page,
            reason: format!(
                "simulated outage (attempt {} of {})",
                self.failures_served, plan.attempts
            ),
        })
    }
}

impl PageSource<Article> for MockArticleSource {
    fn fetch_page(&mut self, page: PageNumber) -> Result<Page<Article>, FetchError> {
        let latency = self.latency_for(page);
        if !latency.is_zero() {
            thread::sleep(latency);
        }

        if let Some(err) = self.injected_failure(page) {
            warn!(%page, error = %err, "Injected fetch failure");
            return Err(err);
        }

        let result = slice_page(&self.articles, page, self.page_size);
        debug!(%page, count = result.len(), has_more = result.has_more, "Served page");
        Ok(result)
    }
}
