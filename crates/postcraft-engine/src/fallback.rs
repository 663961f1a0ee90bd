//! Deterministic local text used when no provider is configured, or when a
//! provider call fails.
//!
//! Output depends only on the content type, theme, and briefing.

use postcraft_core::{Briefing, ContentType, Theme};

type CannedWriter = fn(&Theme, &Briefing) -> String;

const WRITERS: [(ContentType, CannedWriter); 7] = [
    (ContentType::Educational, educational),
    (ContentType::Promotional, promotional),
    (ContentType::Entertaining, entertaining),
    (ContentType::Inspirational, inspirational),
    (ContentType::BehindTheScenes, behind_the_scenes),
    (ContentType::UserGenerated, user_generated),
    (ContentType::IndustryNews, industry_news),
];

/// Canned post text for `content_type`: a title line, a blank line, then body
/// paragraphs.
#[must_use]
pub fn fallback_text(content_type: ContentType, theme: &Theme, briefing: &Briefing) -> String {
    WRITERS
        .iter()
        .find(|(ct, _)| *ct == content_type)
        .map_or_else(|| generic(theme, briefing), |(_, write)| write(theme, briefing))
}

fn audience(briefing: &Briefing) -> &str {
    if briefing.target_audience.trim().is_empty() {
        "our community"
    } else {
        briefing.target_audience.trim()
    }
}

fn educational(theme: &Theme, briefing: &Briefing) -> String {
    format!(
        "3 things to know about {theme}\n\n\
         Getting {theme} right is simpler than it looks. Start with the basics and build from there. \
         Small, consistent improvements beat big one-off changes.\n\n\
         At {business}, we see {audience} get the best results when they focus on one habit at a time.",
        theme = theme.name,
        business = briefing.business_name,
        audience = audience(briefing),
    )
}

fn promotional(theme: &Theme, briefing: &Briefing) -> String {
    format!(
        "Discover {theme} with {business}\n\n\
         We built our approach to {theme} around what {audience} actually need. \
         No fluff, just results you can see.\n\n\
         This is the easiest way to experience it for yourself.",
        theme = theme.name,
        business = briefing.business_name,
        audience = audience(briefing),
    )
}

fn entertaining(theme: &Theme, _briefing: &Briefing) -> String {
    format!(
        "Expectation vs reality: {theme}\n\n\
         Expectation: everything goes exactly to plan. Reality: you learn something new every single time.\n\n\
         Honestly, that is half the fun of {theme}.",
        theme = theme.name,
    )
}

fn inspirational(theme: &Theme, briefing: &Briefing) -> String {
    format!(
        "Every journey with {theme} starts somewhere\n\n\
         Nobody starts as an expert. The people who succeed with {theme} are the ones who keep showing up.\n\n\
         Here's to {audience} who keep going, one step at a time.",
        theme = theme.name,
        audience = audience(briefing),
    )
}

fn behind_the_scenes(theme: &Theme, briefing: &Briefing) -> String {
    format!(
        "Behind the scenes: {theme} at {business}\n\n\
         Ever wondered what goes into {theme}? It takes more care than most people realize. \
         Our team sweats the small details so you don't have to.\n\n\
         Here's a look at how it really comes together.",
        theme = theme.name,
        business = briefing.business_name,
    )
}

fn user_generated(theme: &Theme, briefing: &Briefing) -> String {
    format!(
        "Your {theme} stories inspire us\n\n\
         We love seeing how {audience} make {theme} their own. Every story shows a new way to do it.\n\n\
         Thank you for being part of the {business} community.",
        theme = theme.name,
        business = briefing.business_name,
        audience = audience(briefing),
    )
}

fn industry_news(theme: &Theme, briefing: &Briefing) -> String {
    let industry = if briefing.industry.trim().is_empty() {
        "our industry"
    } else {
        briefing.industry.trim()
    };
    format!(
        "What's changing with {theme} right now\n\n\
         {theme} is moving fast across {industry}. The teams paying attention now will be ahead next year.\n\n\
         Here's our take on what it means for {audience}.",
        theme = theme.name,
        audience = audience(briefing),
    )
}

fn generic(theme: &Theme, briefing: &Briefing) -> String {
    format!(
        "Let's talk about {theme}\n\n{business} has a few thoughts to share about {theme}.",
        theme = theme.name,
        business = briefing.business_name,
    )
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn briefing() -> Briefing {
        Briefing {
            business_name: "Harbor Coffee".to_string(),
            industry: "coffee".to_string(),
            target_audience: "commuters".to_string(),
            brand_voice: "warm".to_string(),
            themes: vec![],
            content_mix: HashMap::new(),
        }
    }

    fn theme() -> Theme {
        Theme {
            name: "Cold Brew".to_string(),
            description: "Slow-steeped coffee".to_string(),
            suitable_for: vec![],
        }
    }

    #[test]
    fn every_content_type_has_a_writer() {
        for ct in ContentType::ALL {
            assert!(
                WRITERS.iter().any(|(c, _)| *c == ct),
                "no fallback writer for {ct}"
            );
        }
    }

    #[test]
    fn fallback_mentions_theme() {
        for ct in ContentType::ALL {
            let text = fallback_text(ct, &theme(), &briefing());
            assert!(text.contains("Cold Brew"), "{ct}: {text}");
        }
    }

    #[test]
    fn fallback_title_line_fits_title_bounds() {
        for ct in ContentType::ALL {
            let text = fallback_text(ct, &theme(), &briefing());
            let first = text.lines().next().unwrap();
            let len = first.chars().count();
            assert!((10..=99).contains(&len), "{ct}: title '{first}' is {len} chars");
        }
    }

    #[test]
    fn fallback_is_deterministic() {
        for ct in ContentType::ALL {
            assert_eq!(
                fallback_text(ct, &theme(), &briefing()),
                fallback_text(ct, &theme(), &briefing())
            );
        }
    }

    #[test]
    fn blank_audience_uses_community_wording() {
        let mut b = briefing();
        b.target_audience = String::new();
        let text = fallback_text(ContentType::Inspirational, &theme(), &b);
        assert!(text.contains("our community"));
    }
}
