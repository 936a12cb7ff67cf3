//! Report rendering for the terminal.

use anyhow::Result;
use clap::ValueEnum;
use colored::Colorize;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Cell, Color, Table};
use survey_insights_engine::{InsightReport, QuestionAnalysis, QuestionInsight};
use survey_insights_text::{SentimentLabel, TextInsights};

#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    /// Summary tables (default)
    #[default]
    Table,
    /// Full report as JSON
    Json,
    /// Full report as YAML
    Yaml,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Table => write!(f, "table"),
            Self::Json => write!(f, "json"),
            Self::Yaml => write!(f, "yaml"),
        }
    }
}

pub struct OutputWriter {
    format: OutputFormat,
}

impl OutputWriter {
    pub fn new(format: OutputFormat, no_color: bool) -> Self {
        if no_color {
            colored::control::set_override(false);
        }
        Self { format }
    }

    pub fn write(&self, report: &InsightReport) -> Result<()> {
        print!("{}", self.render(report)?);
        Ok(())
    }

    pub fn render(&self, report: &InsightReport) -> Result<String> {
        Ok(match self.format {
            OutputFormat::Json => format!("{}\n", serde_json::to_string_pretty(report)?),
            OutputFormat::Yaml => serde_yaml::to_string(report)?,
            OutputFormat::Table => render_tables(report),
        })
    }
}

fn render_tables(report: &InsightReport) -> String {
    let mut out = format!("{} {}\n\n", "Survey".bold(), report.survey_id.cyan());

    if !report.questions.is_empty() {
        let mut table = new_table(&["Question", "Type", "Responses", "Summary"]);
        for question in &report.questions {
            table.add_row(vec![
                Cell::new(&question.question_id),
                Cell::new(format!("{:?}", question.kind).to_lowercase()),
                Cell::new(question.response_count),
                Cell::new(question_summary(question)),
            ]);
        }
        out.push_str(&format!("{table}\n\n"));
    }

    if let Some(text) = &report.text {
        out.push_str(&render_text(text));
    }

    if !report.key_insights.is_empty() {
        out.push_str(&format!("{}\n", "Key insights".bold()));
        for insight in &report.key_insights {
            out.push_str(&format!("  {} {}\n", "•".green(), insight));
        }
        out.push('\n');
    }

    if !report.skipped.is_empty() {
        let mut table = new_table(&["Scope", "Analysis", "Reason"]);
        for skipped in &report.skipped {
            table.add_row(vec![
                Cell::new(&skipped.scope),
                Cell::new(&skipped.analysis),
                Cell::new(&skipped.reason).fg(Color::Yellow),
            ]);
        }
        out.push_str(&format!("{}\n{table}\n", "Skipped analyses".yellow().bold()));
    }

    out
}

fn render_text(text: &TextInsights) -> String {
    let overall = &text.sentiment.overall;
    let mut out = format!(
        "{} {} (score {:.2}, {} responses)\n",
        "Sentiment".bold(),
        colored_label(overall.label),
        overall.score,
        text.statistics.total_responses
    );

    if !text.themes.is_empty() {
        let mut table = new_table(&["Theme", "Category", "Responses", "Sentiment"]);
        for theme in text.themes.iter().take(10) {
            table.add_row(vec![
                Cell::new(&theme.phrase),
                Cell::new(format!("{:?}", theme.category).to_lowercase()),
                Cell::new(theme.response_count),
                Cell::new(format!("{:.2}", theme.sentiment_score)),
            ]);
        }
        out.push_str(&format!("{table}\n"));
    }

    if !text.topics.topics.is_empty() {
        let mut table = new_table(&["Topic", "Mentions", "Share", "Keywords"]);
        for topic in &text.topics.topics {
            table.add_row(vec![
                Cell::new(topic.topic.label()),
                Cell::new(topic.mention_count),
                Cell::new(format!("{:.1}%", topic.percentage)),
                Cell::new(topic.keywords.join(", ")),
            ]);
        }
        out.push_str(&format!("{table}\n"));
    }

    out.push('\n');
    out
}

fn question_summary(question: &QuestionAnalysis) -> String {
    match &question.insight {
        QuestionInsight::Descriptive(stats) => format!(
            "mean {:.2}, median {:.2}, sd {:.2}",
            stats.mean, stats.median, stats.std_dev
        ),
        QuestionInsight::Text(text) => format!(
            "{} sentiment, {} themes",
            label_text(text.sentiment.overall.label),
            text.themes.len()
        ),
        QuestionInsight::Choice(distribution) => match &distribution.mode {
            Some(mode) => format!("most chosen: {}", mode),
            None => "no selections".to_string(),
        },
    }
}

fn new_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.apply_modifier(UTF8_ROUND_CORNERS);
    table.set_header(headers.iter().map(|h| Cell::new(h).fg(Color::Cyan)).collect::<Vec<_>>());
    table
}

fn label_text(label: SentimentLabel) -> &'static str {
    match label {
        SentimentLabel::Positive => "positive",
        SentimentLabel::Negative => "negative",
        SentimentLabel::Neutral => "neutral",
    }
}

fn colored_label(label: SentimentLabel) -> colored::ColoredString {
    match label {
        SentimentLabel::Positive => label_text(label).green(),
        SentimentLabel::Negative => label_text(label).red(),
        SentimentLabel::Neutral => label_text(label).normal(),
    }
}
