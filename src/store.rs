//! The root controller: one state container, one reducer.
//!
//! [`Store::dispatch`] is the only way state changes. Remote work is never
//! done here; the reducer hands back a [`Command`] and the runtime feeds the
//! outcome back in as another [`Action`].

use std::collections::{HashMap, HashSet, VecDeque};

use tracing::{debug, info, warn};

use crate::{
    category::{self, Category},
    error::{GatewayError, ValidationError},
    form::{FormEdit, PostForm},
    gateway::{Gateway, PostQuery, FETCH_LIMIT},
    post::{NewPost, Post, PostId, VoteChanges, VoteColumn},
    vote::VoteTracker,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryFilter {
    All,
    Only(&'static Category),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Remote,
    Validation,
    Integrity,
}

/// A message the user has to acknowledge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

#[derive(Debug)]
pub enum Action {
    Refresh,
    SelectFilter(CategoryFilter),
    ToggleSort(VoteColumn),
    Vote { id: PostId, column: VoteColumn },
    ToggleForm,
    EditForm(FormEdit),
    SubmitForm,
    ToggleTheme,
    SelectNext,
    SelectPrevious,
    DismissNotice,
    Quit,

    FetchDone {
        seq: u64,
        result: Result<Vec<Post>, GatewayError>,
    },
    InsertDone(Result<Post, GatewayError>),
    VoteDone {
        id: PostId,
        result: Result<Post, GatewayError>,
    },
}

/// Remote work requested by the reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Fetch { seq: u64, query: PostQuery },
    Insert(NewPost),
    Vote { id: PostId, changes: VoteChanges },
}

pub struct Store {
    posts: Vec<Post>,
    filter: CategoryFilter,
    sort: Option<VoteColumn>,
    loading: bool,
    fetch_seq: u64,
    votes: HashMap<PostId, VoteTracker>,
    form: Option<PostForm>,
    theme: Theme,
    notices: VecDeque<Notice>,
    cursor: usize,
    quit: bool,
}

impl CategoryFilter {
    pub fn name(&self) -> Option<&'static str> {
        match self {
            Self::All => None,
            Self::Only(category) => Some(category.name),
        }
    }

    /// Steps through `All` followed by the registry, wrapping around.
    pub fn cycle(self, forward: bool) -> Self {
        let all = category::all();
        // 0 is `All`, 1..=len are the categories.
        let slots = all.len() + 1;
        let current = match self {
            Self::All => 0,
            Self::Only(category) => category::index_of(category) + 1,
        };
        let next = if forward {
            (current + 1) % slots
        } else {
            (current + slots - 1) % slots
        };

        match next {
            0 => Self::All,
            n => Self::Only(&all[n - 1]),
        }
    }
}

/// Sort-control semantics: clicking the active key clears it.
pub fn toggle_sort(current: Option<VoteColumn>, column: VoteColumn) -> Option<VoteColumn> {
    if current == Some(column) {
        None
    } else {
        Some(column)
    }
}

impl Notice {
    fn remote(context: &str, err: &GatewayError) -> Self {
        Self {
            kind: NoticeKind::Remote,
            message: format!("{context}: {err}"),
        }
    }

    fn validation(errors: &[ValidationError]) -> Self {
        let reasons: Vec<String> = errors.iter().map(ToString::to_string).collect();
        Self {
            kind: NoticeKind::Validation,
            message: format!("Cannot post yet: {}", reasons.join("; ")),
        }
    }
}

impl Store {
    pub fn new(theme: Theme) -> Self {
        Self {
            posts: Vec::new(),
            filter: CategoryFilter::All,
            sort: None,
            loading: false,
            fetch_seq: 0,
            votes: HashMap::new(),
            form: None,
            theme,
            notices: VecDeque::new(),
            cursor: 0,
            quit: false,
        }
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn filter(&self) -> CategoryFilter {
        self.filter
    }

    pub fn sort(&self) -> Option<VoteColumn> {
        self.sort
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn form(&self) -> Option<&PostForm> {
        self.form.as_ref()
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notices.front()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn selected_post(&self) -> Option<&Post> {
        self.posts.get(self.cursor)
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn vote_tracker(&self, id: &PostId) -> Option<&VoteTracker> {
        self.votes.get(id)
    }

    pub fn dispatch(&mut self, action: Action) -> Option<Command> {
        match action {
            Action::Refresh => Some(self.start_fetch()),
            Action::SelectFilter(filter) => {
                self.filter = filter;
                Some(self.start_fetch())
            }
            Action::ToggleSort(column) => {
                self.sort = toggle_sort(self.sort, column);
                Some(self.start_fetch())
            }
            Action::Vote { id, column } => self.start_vote(id, column),
            Action::ToggleForm => {
                self.toggle_form();
                None
            }
            Action::EditForm(edit) => {
                if let Some(form) = self.form.as_mut() {
                    form.edit(edit);
                }
                None
            }
            Action::SubmitForm => self.submit_form(),
            Action::ToggleTheme => {
                self.theme = match self.theme {
                    Theme::Dark => Theme::Light,
                    Theme::Light => Theme::Dark,
                };
                None
            }
            Action::SelectNext => {
                if self.cursor + 1 < self.posts.len() {
                    self.cursor += 1;
                }
                None
            }
            Action::SelectPrevious => {
                self.cursor = self.cursor.saturating_sub(1);
                None
            }
            Action::DismissNotice => {
                self.notices.pop_front();
                None
            }
            Action::Quit => {
                self.quit = true;
                None
            }
            Action::FetchDone { seq, result } => {
                self.finish_fetch(seq, result);
                None
            }
            Action::InsertDone(result) => {
                self.finish_insert(result);
                None
            }
            Action::VoteDone { id, result } => {
                self.finish_vote(id, result);
                None
            }
        }
    }

    fn start_fetch(&mut self) -> Command {
        self.fetch_seq += 1;
        self.loading = true;

        let query = PostQuery {
            category: self.filter.name().map(str::to_owned),
            sort: self.sort,
            limit: FETCH_LIMIT,
        };
        info!(
            seq = self.fetch_seq,
            category = query.category.as_deref().unwrap_or("all"),
            sort = query.sort.map(VoteColumn::as_str).unwrap_or("none"),
            "fetching posts"
        );

        Command::Fetch {
            seq: self.fetch_seq,
            query,
        }
    }

    fn finish_fetch(&mut self, seq: u64, result: Result<Vec<Post>, GatewayError>) {
        if seq != self.fetch_seq {
            debug!(seq, latest = self.fetch_seq, "dropping stale fetch response");
            return;
        }
        self.loading = false;

        let posts = match result {
            Ok(posts) => posts,
            Err(e) => {
                warn!(error = %e, "fetch failed, keeping previous list");
                self.notices
                    .push_back(Notice::remote("There was a problem getting data", &e));
                return;
            }
        };

        info!(seq, count = posts.len(), "posts loaded");
        self.posts = posts;

        // An in-flight vote keeps its tracker so the post stays guarded if it
        // comes back before the reply lands.
        let live: HashSet<&PostId> = self.posts.iter().map(|p| &p.id).collect();
        self.votes
            .retain(|id, tracker| live.contains(id) || tracker.is_pending());
        self.cursor = self.cursor.min(self.posts.len().saturating_sub(1));
        self.report_unknown_categories();
    }

    fn report_unknown_categories(&mut self) {
        let mut unknown = Vec::new();
        for post in &self.posts {
            if let Err(e) = category::color_of(&post.category) {
                warn!(id = %post.id, error = %e, "post has an unregistered category");
                if !unknown.contains(&post.category) {
                    unknown.push(post.category.clone());
                }
            }
        }

        if !unknown.is_empty() {
            self.notices.push_back(Notice {
                kind: NoticeKind::Integrity,
                message: format!("Some posts use unknown categories: {}", unknown.join(", ")),
            });
        }
    }

    fn start_vote(&mut self, id: PostId, column: VoteColumn) -> Option<Command> {
        let post = self.posts.iter().find(|p| p.id == id)?;
        let tracker = self.votes.entry(id.clone()).or_default();

        let Some(changes) = tracker.begin(column, post) else {
            debug!(%id, "vote already in flight, ignoring click");
            return None;
        };
        info!(%id, column = column.as_str(), "voting");

        Some(Command::Vote { id, changes })
    }

    fn finish_vote(&mut self, id: PostId, result: Result<Post, GatewayError>) {
        match result {
            Ok(row) => {
                if let Some(tracker) = self.votes.get_mut(&id) {
                    tracker.confirm();
                }
                if !self.replace_post(row) {
                    debug!(%id, "voted post is no longer listed, discarding row");
                }
            }
            Err(e) => {
                if let Some(tracker) = self.votes.get_mut(&id) {
                    tracker.fail();
                }
                warn!(%id, error = %e, "vote failed");
                self.notices
                    .push_back(Notice::remote("There was a problem saving your vote", &e));
            }
        }
    }

    /// Swaps in the server's row for the post with the same id, keeping list
    /// order. Returns false if no such post is listed.
    pub fn replace_post(&mut self, row: Post) -> bool {
        match self.posts.iter_mut().find(|p| p.id == row.id) {
            Some(slot) => {
                *slot = row;
                true
            }
            None => false,
        }
    }

    fn toggle_form(&mut self) {
        match self.form.as_ref().map(|f| f.uploading) {
            Some(true) => {}
            Some(false) => self.form = None,
            None => self.form = Some(PostForm::default()),
        }
    }

    fn submit_form(&mut self) -> Option<Command> {
        let form = self.form.as_mut()?;
        if form.uploading {
            return None;
        }

        match form.validate() {
            Ok(new_post) => {
                form.uploading = true;
                info!(category = %new_post.category, "submitting post");
                Some(Command::Insert(new_post))
            }
            Err(errors) => {
                debug!(?errors, "submission rejected");
                self.notices.push_back(Notice::validation(&errors));
                None
            }
        }
    }

    fn finish_insert(&mut self, result: Result<Post, GatewayError>) {
        match result {
            Ok(post) => {
                info!(id = %post.id, "post created");
                self.posts.insert(0, post);
                self.cursor = 0;
                self.form = None;
            }
            Err(e) => {
                warn!(error = %e, "insert failed, keeping draft");
                if let Some(form) = self.form.as_mut() {
                    form.uploading = false;
                }
                self.notices
                    .push_back(Notice::remote("There was a problem creating the post", &e));
            }
        }
    }
}

/// Runs `command` against `gateway` and wraps the outcome as the matching
/// completion action.
pub async fn execute(gateway: &dyn Gateway, command: Command) -> Action {
    match command {
        Command::Fetch { seq, query } => Action::FetchDone {
            seq,
            result: gateway.fetch_posts(&query).await,
        },
        Command::Insert(post) => Action::InsertDone(gateway.insert_post(&post).await),
        Command::Vote { id, changes } => {
            let result = gateway.update_votes(&id, &changes).await;
            Action::VoteDone { id, result }
        }
    }
}
