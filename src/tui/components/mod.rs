use ratatui::{layout::Rect, Frame};

use super::ui::Palette;
use crate::store::Store;

pub(crate) trait Component {
    fn render(&self, f: &mut Frame, area: Rect, store: &Store, palette: &Palette);
}

pub(crate) mod form;
pub(crate) mod header;
pub(crate) mod notice;
pub(crate) mod post_list;
pub(crate) mod sidebar;
pub(crate) mod sort_bar;

pub(crate) use form::FormComponent;
pub(crate) use header::HeaderComponent;
pub(crate) use notice::NoticeComponent;
pub(crate) use post_list::PostListComponent;
pub(crate) use sidebar::SidebarComponent;
pub(crate) use sort_bar::SortBarComponent;
