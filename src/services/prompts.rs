/// Prompt templates for the generation endpoint
///
/// Every function here is pure: structured input goes in, a prompt string
/// comes out. User input is substituted verbatim.
use chrono::NaiveDate;

use crate::models::{Category, FavoriteItem, LookupMode};

const RECOMMENDATION_RULES: &str = "\
STRICT RULES FOR REASONING:
1. Provide a short, punchy reason why you chose it.
2. IMPORTANT: If a recommended Book has a movie/TV adaptation, you MUST mention it in the reason (e.g., \"Also a movie\").
3. IMPORTANT: If a recommended Movie/TV Series is based on a book, you MUST mention it in the reason (e.g., \"Based on the book by...\").

STRICT RULES FOR DATA FIELDS:
- title: The name of the work.
- creator:
   - If Category is \"Book\", this MUST be the Author's name.
   - If Category is \"Music\", this MUST be the Artist/Band name.
   - If Category is \"Movie\" or \"TV Series\", provide the primary Director or Showrunner name.

The recommendations should fit the same \"universe\" or \"feeling\" as the collected list.";

const STREAMING_FORMAT: &str = "\
STRICT OUTPUT FORMAT for TV Series:
Available on: **[Platform 1]**, **[Platform 2]**
Total: [X] Seasons, [Y] Episodes
Season 1: [Count] Episodes (Broadcast date of episode 1 for this season)
Season 2: [Count] Episodes (Broadcast date of episode 1 for this season)
... (continue for all seasons)
**Coming Soon:** [Date/Info] (Only if applicable)

STRICT OUTPUT FORMAT for Movies:
Available on: **[Platform 1]**, **[Platform 2]**
Runtime: [Hours]h [Minutes]m
**Coming Soon:** [Date/Info] (Only if applicable)

Do not add extra conversational text. Just the data.";

const ISRAELI_SERIES_FORMAT: &str = "\
STRICT OUTPUT FORMAT:
**[Channel Name]** - [Hebrew Name]
Total: [X] Seasons, [Y] Episodes
Last Aired Episode: [Date]
**Coming Soon:** [Date/Info] (Only if applicable)

Season 1: [Count] Episodes (Broadcast date of episode 1 for this season)
Season 2: [Count] Episodes (Broadcast date of episode 1 for this season)
... (continue for all seasons)

If it's not an Israeli series or not found, just say \"Could not find info for this Israeli series.\"";

const ALL_PROVIDERS_CLAUSE: &str = "CHECK ALL PROVIDERS: Check availability on Kan 11, Keshet 12, Reshet 13, HOT, YES, Partner, Cellcom.";

/// One line per favorite: `- [category]: title (details)`
pub fn favorites_summary(favorites: &[FavoriteItem]) -> String {
    favorites
        .iter()
        .map(|favorite| {
            // blank details from a form field count as absent
            let details = favorite
                .details
                .as_deref()
                .map(str::trim)
                .filter(|details| !details.is_empty());

            match details {
                Some(details) => {
                    format!("- [{}]: {} ({})", favorite.category, favorite.title, details)
                }
                None => format!("- [{}]: {}", favorite.category, favorite.title),
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Distinct categories in order of first appearance
pub fn distinct_categories(favorites: &[FavoriteItem]) -> Vec<Category> {
    let mut categories = Vec::new();
    for favorite in favorites {
        if !categories.contains(&favorite.category) {
            categories.push(favorite.category);
        }
    }
    categories
}

/// Exclusion clause, or `None` when nothing is excluded
///
/// Each title is listed once, in order of first appearance.
pub fn exclusion_clause(exclude_titles: &[String]) -> Option<String> {
    if exclude_titles.is_empty() {
        return None;
    }

    let mut titles: Vec<&str> = Vec::new();
    for title in exclude_titles {
        if !titles.contains(&title.as_str()) {
            titles.push(title);
        }
    }

    Some(format!(
        "IMPORTANT: Do NOT recommend any of the following titles as I have already seen them: {}.",
        titles.join(", ")
    ))
}

/// Taste-based recommendation prompt
pub fn recommendations_prompt(favorites: &[FavoriteItem], exclude_titles: &[String]) -> String {
    let category_instructions = distinct_categories(favorites)
        .iter()
        .map(|category| {
            format!(
                "For the category \"{}\", provide exactly 3 distinct recommendations that fit the vibe.",
                category
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let mut sections = vec![
        format!(
            "Here is a list of my favorite entertainment media:\n{}",
            favorites_summary(favorites)
        ),
        "Based on the style, genre, tone, and vibe of these favorites, please recommend content matching the categories I have listed.".to_string(),
        category_instructions,
    ];

    if let Some(clause) = exclusion_clause(exclude_titles) {
        sections.push(clause);
    }

    sections.push(RECOMMENDATION_RULES.to_string());
    sections.join("\n\n")
}

/// Prompt asking for other works by the creator of `current_title`
pub fn creator_works_prompt(creator: &str, category: &str, current_title: &str) -> String {
    format!(
        "I liked the {category} \"{current_title}\" by {creator}.

Please recommend 3 OTHER popular or highly-rated works specifically by {creator}.

STRICT RULES:
1. Do NOT include \"{current_title}\".
2. Category must be \"{category}\".
3. Creator must be \"{creator}\".
4. Reason should be a brief description of the plot or style.

STRICT OUTPUT FORMAT (JSON):
Return an object with a \"recommendations\" array containing the items."
    )
}

/// Renders a date the way the prompts state "today", e.g. `March 4, 2025`
pub fn format_today(today: NaiveDate) -> String {
    today.format("%B %-d, %Y").to_string()
}

/// Free-text availability prompt.
///
/// With `discover_current_airing` set the query is never used.
pub fn lookup_prompt(
    query: &str,
    mode: LookupMode,
    discover_current_airing: bool,
    check_all_providers: bool,
    today: NaiveDate,
) -> String {
    let today = format_today(today);

    match (mode, discover_current_airing) {
        (LookupMode::Streaming, false) => format!(
            "You are a helpful media assistant. User is asking: Where can I stream \"{query}\"?
Context: Today is {today}.

Instructions:
1. List major streaming platforms (Netflix, Amazon Prime, HBO, Disney+, Hulu, Apple TV+, etc.).
2. If it is a TV Series, provide a breakdown for EACH season.
3. If it is a Movie, just provide the runtime.
4. CRITICAL: If a new season or the content has a confirmed \"Coming Soon\" date (future date relative to today), you MUST mention it clearly.

{STREAMING_FORMAT}"
        ),
        (LookupMode::Streaming, true) => format!(
            "List 5 popular TV series on major streaming platforms (Netflix, Amazon Prime, HBO, Disney+, Hulu, Apple TV+, etc.) that are ACTIVELY RELEASING new episodes or have released a new episode within the last 3 months.

Context: Today is {today}.
CRITICAL RULE: Do NOT list shows that ended years ago.

For EACH series, follow this format STRICTLY:
**Series Name** (**Platform**)
[Total Seasons] Seasons, [Total Episodes] Episodes
Last Aired: [Date of most recent episode]
**Next Episode / Coming Soon:** [Date/Info] (If known)

Leave a blank line between series."
        ),
        (LookupMode::Israeli, true) => format!(
            "List 5 popular Israeli TV series that are ACTIVELY BROADCASTING new episodes (active season) or have aired a new episode within the last 3 months.

Context: Today is {today}.
CRITICAL RULE: Do NOT list shows that ended years ago. Only list shows active within the last year.

For EACH series, follow this format STRICTLY:
**Series Name** - [Hebrew Name] (**Channel/Provider**)
[Total Seasons] Seasons, [Total Episodes] Episodes
Last Aired: [Date of most recent episode]
**Next Episode / Coming Soon:** [Date/Info] (If known)

Leave a blank line between series."
        ),
        (LookupMode::Israeli, false) => {
            let mut prompt = format!(
                "Provide details for the Israeli TV series \"{query}\".
Context: Today is {today}.

Instructions:
1. Identify the Broadcast Channel.
2. Provide the Hebrew Name.
3. Identify the date of the most recently aired episode (Last Aired).
4. Provide a breakdown for EACH season.
5. CRITICAL: If a new season or episode has a confirmed \"Coming Soon\" date (future date), you MUST mention it.

"
            );
            if check_all_providers {
                prompt.push_str(ALL_PROVIDERS_CLAUSE);
                prompt.push_str("\n\n");
            }
            prompt.push_str(ISRAELI_SERIES_FORMAT);
            prompt
        }
    }
}
