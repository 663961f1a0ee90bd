//! Static template catalog: content type → format → structure and prompts.
//!
//! Prompt patterns use `{theme}`, `{industry}`, `{audience}`, and `{business}`
//! placeholders, filled by [`Template::render_pattern`].

use postcraft_core::{Briefing, ContentType, Theme};

/// One post format for a content type.
#[derive(Debug, PartialEq, Eq)]
pub struct Template {
    pub content_type: ContentType,
    pub format: &'static str,
    /// Ordered structural sections, e.g. hook → problem → solution → cta.
    pub sections: &'static [&'static str],
    pub prompts: &'static [&'static str],
}

impl Template {
    /// Sections joined with an arrow, as they appear in prompts.
    #[must_use]
    pub fn structure(&self) -> String {
        self.sections.join(" → ")
    }

    /// Fill a prompt pattern's placeholders from the theme and briefing.
    #[must_use]
    pub fn render_pattern(pattern: &str, theme: &Theme, briefing: &Briefing) -> String {
        pattern
            .replace("{theme}", &theme.name)
            .replace("{industry}", &briefing.industry)
            .replace("{audience}", &briefing.target_audience)
            .replace("{business}", &briefing.business_name)
    }
}

pub static TEMPLATES: &[Template] = &[
    // Educational
    Template {
        content_type: ContentType::Educational,
        format: "tips_list",
        sections: &["hook", "tips", "summary", "cta"],
        prompts: &[
            "Share 3 practical tips about {theme} that {audience} can use today.",
            "List the most common mistakes people make with {theme} and how to avoid them.",
        ],
    },
    Template {
        content_type: ContentType::Educational,
        format: "how_to",
        sections: &["hook", "problem", "steps", "result", "cta"],
        prompts: &[
            "Explain step by step how {audience} can get better results with {theme}.",
            "Walk through a simple {theme} process anyone in {industry} can follow.",
        ],
    },
    Template {
        content_type: ContentType::Educational,
        format: "myth_buster",
        sections: &["myth", "truth", "evidence", "cta"],
        prompts: &["Debunk a popular myth about {theme} in {industry}."],
    },
    // Promotional
    Template {
        content_type: ContentType::Promotional,
        format: "product_spotlight",
        sections: &["hook", "problem", "solution", "benefits", "cta"],
        prompts: &[
            "Introduce how {business} helps {audience} with {theme}.",
            "Highlight the single biggest benefit {business} offers around {theme}.",
        ],
    },
    Template {
        content_type: ContentType::Promotional,
        format: "limited_offer",
        sections: &["urgency", "offer", "value", "cta"],
        prompts: &["Announce a time-limited offer from {business} tied to {theme}."],
    },
    // Entertaining
    Template {
        content_type: ContentType::Entertaining,
        format: "relatable_moment",
        sections: &["setup", "twist", "punchline", "cta"],
        prompts: &[
            "Write a lighthearted, relatable moment every {audience} has experienced with {theme}.",
            "Describe a funny 'expectation vs reality' about {theme} in {industry}.",
        ],
    },
    Template {
        content_type: ContentType::Entertaining,
        format: "this_or_that",
        sections: &["question", "option_a", "option_b", "cta"],
        prompts: &["Pose a playful this-or-that question about {theme} for {audience}."],
    },
    // Inspirational
    Template {
        content_type: ContentType::Inspirational,
        format: "success_story",
        sections: &["challenge", "journey", "outcome", "lesson", "cta"],
        prompts: &[
            "Tell a short success story about overcoming a challenge with {theme}.",
            "Share a journey in {industry} that shows what is possible with {theme}.",
        ],
    },
    Template {
        content_type: ContentType::Inspirational,
        format: "motivational_quote",
        sections: &["quote", "reflection", "cta"],
        prompts: &["Open with an original motivational line about {theme} and reflect on it for {audience}."],
    },
    // Behind the scenes
    Template {
        content_type: ContentType::BehindTheScenes,
        format: "day_in_the_life",
        sections: &["intro", "moments", "insight", "cta"],
        prompts: &["Show a day in the life at {business} while working on {theme}."],
    },
    Template {
        content_type: ContentType::BehindTheScenes,
        format: "process_reveal",
        sections: &["hook", "process", "detail", "cta"],
        prompts: &[
            "Reveal how {business} approaches {theme} behind the scenes.",
            "Share a detail about {theme} that {audience} rarely get to see.",
        ],
    },
    // User generated
    Template {
        content_type: ContentType::UserGenerated,
        format: "customer_spotlight",
        sections: &["introduction", "story", "gratitude", "cta"],
        prompts: &["Celebrate a customer who shared their experience with {theme}."],
    },
    Template {
        content_type: ContentType::UserGenerated,
        format: "community_challenge",
        sections: &["challenge", "rules", "reward", "cta"],
        prompts: &["Invite {audience} to share their own {theme} moments with {business}."],
    },
    // Industry news
    Template {
        content_type: ContentType::IndustryNews,
        format: "trend_analysis",
        sections: &["headline", "context", "impact", "opinion", "cta"],
        prompts: &[
            "Comment on a current trend in {industry} related to {theme}.",
            "Explain what recent changes around {theme} mean for {audience}.",
        ],
    },
    Template {
        content_type: ContentType::IndustryNews,
        format: "quick_take",
        sections: &["news", "take", "cta"],
        prompts: &["Give a short expert take from {business} on {theme} news in {industry}."],
    },
];

/// All formats available for a content type, in catalog order.
#[must_use]
pub fn templates_for(catalog: &'static [Template], content_type: ContentType) -> Vec<&'static Template> {
    catalog
        .iter()
        .filter(|t| t.content_type == content_type)
        .collect()
}
