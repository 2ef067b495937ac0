//! Canned data, served when no extraction engine is available, and as a
//! fallback when an engine fails.

pub const SAMPLE_EXTRACTED_TEXT: &str = "Screenshot Analysis:

Title: Dashboard Overview
Date: March 15, 2025
User: John Doe
Status: Active

Key Metrics:
- Total Users: 1,245
- Active Sessions: 87
- Conversion Rate: 3.2%
- Revenue: $12,450

Recent Activity:
- 3 new sign-ups in the last hour
- 15 completed transactions
- 2 support tickets opened

System Status: All systems operational
Last Updated: 10:45 AM";

const USERS_ANSWER: &str = "Based on the screenshot, there are 1,245 total users, with 87 currently active sessions. There have been 3 new sign-ups in the last hour.";

const REVENUE_ANSWER: &str = "The screenshot shows a revenue of $12,450. The conversion rate is 3.2%, which suggests there's room for improvement in your sales funnel.";

const STATUS_ANSWER: &str = "According to the screenshot, all systems are operational. The dashboard was last updated at 10:45 AM.";

const ACTIVITY_ANSWER: &str = "Recent activity shown in the screenshot includes 3 new sign-ups in the last hour, 15 completed transactions, and 2 support tickets that have been opened.";

const DATE_ANSWER: &str = "The screenshot shows data from March 15, 2025. The dashboard was last updated at 10:45 AM.";

pub const DEFAULT_ANSWER: &str = "Based on the screenshot, I can see this is a dashboard overview for John Doe showing various metrics including users, revenue, and system status. What specific information would you like to know about the data shown?";

// First match wins.
const ANSWERS: &[(&[&str], &str)] = &[
    (&["user"], USERS_ANSWER),
    (&["revenue", "money", "income"], REVENUE_ANSWER),
    (&["status", "system"], STATUS_ANSWER),
    (&["activity", "recent"], ACTIVITY_ANSWER),
    (&["date", "time"], DATE_ANSWER),
];

/// Answers a question about the sample screenshot, based on keywords.
pub fn sample_answer(question: &str) -> &'static str {
    let question = question.to_lowercase();
    ANSWERS
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|keyword| question.contains(keyword)))
        .map(|(_, answer)| *answer)
        .unwrap_or(DEFAULT_ANSWER)
}
