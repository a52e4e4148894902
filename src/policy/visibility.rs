use crate::models::gift::Gift;
use crate::models::gift_list::GiftList;

/// Whether `viewer` is one of the people the list is for.
pub fn is_recipient(list: &GiftList, viewer: &str) -> bool {
    list.has_recipient(viewer)
}

/// Filter a list's gifts down to what `viewer` may see.
///
/// Recipients only see the gifts they suggested themselves. Everyone else sees
/// every gift on the list. The result is in ascending creation order (ties by
/// id) and never contains gifts belonging to another list.
///
/// This only decides which rows are visible. Hiding status, buyers and
/// comments from recipients is done when the rows are rendered.
pub fn visible_gifts(list: &GiftList, gifts: Vec<Gift>, viewer: &str) -> Vec<Gift> {
    let recipient = is_recipient(list, viewer);

    let mut visible: Vec<Gift> = gifts
        .into_iter()
        .filter(|gift| gift.list_id == list.id)
        .filter(|gift| !recipient || gift.added_by == viewer)
        .collect();

    visible.sort_by_key(|gift| (gift.created_at, gift.id));
    visible
}
