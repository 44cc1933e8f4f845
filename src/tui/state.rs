use crate::feed::types::Article;
use std::collections::VecDeque;
use std::time::Instant;

#[derive(Debug, Clone)]
pub struct AppState {
    pub city: Option<String>,
    pub wiki_url: Option<String>,
    pub temperature_f: Option<String>,
    pub cards: Vec<ArticleCard>,
    /// The filter currently applied to the cards. Empty means all shown.
    pub search_query: String,
    /// Some while the search box is being edited; submit applies it.
    pub search_input: Option<String>,
    /// Index into the visible cards.
    pub selected: usize,
    pub detail_open: bool,
    pub source_status: Vec<SourceStatus>,
    pub refreshing: bool,
    pub last_refresh: Option<String>,
    pub logs: VecDeque<LogEntry>,
    pub start_time: Instant,
}

#[derive(Debug, Clone)]
pub struct ArticleCard {
    pub article: Article,
    pub hidden: bool,
}

impl ArticleCard {
    /// The card's rendered text, which is what the search filter scans:
    /// title, author, source label, and publication date. The summary only
    /// appears in the detail view, so it is not part of the haystack.
    pub fn rendered_text(&self) -> String {
        format!(
            "{} {} {} {}",
            self.article.title, self.article.author, self.article.source, self.article.published_at
        )
    }
}

#[derive(Debug, Clone)]
pub struct SourceStatus {
    pub label: String,
    pub health: SourceHealth,
}

#[derive(Debug, Clone)]
pub enum SourceHealth {
    Pending,
    Ok(usize),
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub time: String,
    pub level: String,
    pub message: String,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            city: None,
            wiki_url: None,
            temperature_f: None,
            cards: Vec::new(),
            search_query: String::new(),
            search_input: None,
            selected: 0,
            detail_open: false,
            source_status: Vec::new(),
            refreshing: false,
            last_refresh: None,
            logs: VecDeque::with_capacity(200),
            start_time: Instant::now(),
        }
    }

    pub fn push_log(&mut self, level: &str, message: String) {
        let time = chrono::Local::now().format("%H:%M:%S").to_string();
        if self.logs.len() >= 200 {
            self.logs.pop_front();
        }
        self.logs.push_back(LogEntry {
            time,
            level: level.to_string(),
            message,
        });
    }

    /// Replace the card list (a fresh feed cycle). The active search query is
    /// reapplied so a refresh does not silently drop the filter.
    pub fn set_articles(&mut self, articles: Vec<Article>) {
        self.cards = articles
            .into_iter()
            .map(|article| ArticleCard {
                article,
                hidden: false,
            })
            .collect();
        let query = self.search_query.clone();
        if !query.is_empty() {
            self.apply_search(&query);
        } else {
            self.selected = 0;
        }
        self.detail_open = false;
    }

    /// Hide every card whose rendered text does not contain the query as a
    /// literal, case-sensitive substring. Linear scan over the current cards.
    pub fn apply_search(&mut self, query: &str) {
        self.search_query = query.to_string();
        for card in &mut self.cards {
            card.hidden = !query.is_empty() && !card.rendered_text().contains(query);
        }
        self.selected = 0;
        self.detail_open = false;
    }

    /// Clear the query and re-show every card.
    pub fn reset_search(&mut self) {
        self.search_query.clear();
        for card in &mut self.cards {
            card.hidden = false;
        }
        self.selected = 0;
        self.detail_open = false;
    }

    pub fn visible_indices(&self) -> Vec<usize> {
        self.cards
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.hidden)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn visible_count(&self) -> usize {
        self.cards.iter().filter(|c| !c.hidden).count()
    }

    pub fn selected_card(&self) -> Option<&ArticleCard> {
        let visible = self.visible_indices();
        visible.get(self.selected).map(|&i| &self.cards[i])
    }

    pub fn select_next(&mut self) {
        let count = self.visible_count();
        if count > 0 && self.selected + 1 < count {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.visible_count().saturating_sub(1);
    }

    pub fn uptime(&self) -> String {
        let secs = self.start_time.elapsed().as_secs();
        let h = secs / 3600;
        let m = (secs % 3600) / 60;
        format!("{}h {:02}m", h, m)
    }
}
