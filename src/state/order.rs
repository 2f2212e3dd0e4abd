/// Draw order of map entities; the last entry is drawn on top.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DrawOrder {
    order: Vec<String>,
    hovered: Option<String>,
}

impl DrawOrder {
    pub fn order(&self) -> &[String] {
        &self.order
    }

    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    /// Marks `id` as hovered and moves it to the top. `None` only clears the
    /// hover marker; the order history is kept.
    pub fn hover(&mut self, id: Option<&str>) {
        match id {
            Some(id) => {
                self.bring_to_front(id);
                self.hovered = Some(id.to_owned());
            }
            None => self.hovered = None,
        }
    }

    pub fn bring_to_front(&mut self, id: &str) {
        self.order.retain(|entry| entry != id);
        self.order.push(id.to_owned());
    }

    pub fn clear_hover(&mut self) {
        self.hovered = None;
    }
}

/// Reorders `items` so that ids listed in `order` come last, in that order.
/// Ids without a matching item are skipped.
pub fn sort_by_order<'a, T, F>(items: &'a [T], order: &[String], id_of: F) -> Vec<&'a T>
where
    F: Fn(&T) -> &str,
{
    let mut sorted = items.iter().collect::<Vec<_>>();
    for id in order {
        if let Some(index) = sorted.iter().position(|item| id_of(*item) == id.as_str()) {
            let item = sorted.remove(index);
            sorted.push(item);
        }
    }
    sorted
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn replay(events: &[Option<&str>]) -> DrawOrder {
        let mut order = DrawOrder::default();
        for event in events {
            order.hover(*event);
        }
        order
    }

    #[test]
    fn hover_moves_entry_to_end() {
        let order = replay(&[Some("a"), Some("b"), Some("c"), Some("a")]);
        assert_eq!(order.order(), ["b", "c", "a"]);
        assert_eq!(order.hovered(), Some("a"));
    }

    #[test]
    fn null_hover_keeps_history() {
        let order = replay(&[Some("a"), Some("b"), None]);
        assert_eq!(order.order(), ["a", "b"]);
        assert_eq!(order.hovered(), None);
    }

    #[test]
    fn every_id_appears_once_in_recency_order() {
        let events = [
            Some("x"),
            None,
            Some("y"),
            Some("x"),
            Some("x"),
            None,
            Some("z"),
            Some("y"),
            None,
            Some("w"),
            Some("x"),
        ];

        for length in 0..=events.len() {
            let prefix = &events[..length];
            let order = replay(prefix);

            let unique = order.order().iter().collect::<HashSet<_>>();
            assert_eq!(unique.len(), order.order().len(), "duplicates after {prefix:?}");

            let mut expected: Vec<&str> = Vec::new();
            for id in prefix.iter().rev().flatten() {
                if !expected.contains(id) {
                    expected.push(*id);
                }
            }
            expected.reverse();
            assert_eq!(order.order(), expected.as_slice(), "after {prefix:?}");
        }
    }

    #[test]
    fn same_events_give_same_order() {
        let events = [Some("1"), Some("2"), None, Some("1"), Some("3")];
        assert_eq!(replay(&events), replay(&events));
    }

    #[test]
    fn sort_by_order_moves_listed_items_last() {
        let items = ["a", "b", "c", "d"];
        let order = vec!["b".to_owned(), "missing".to_owned(), "a".to_owned()];
        let sorted = sort_by_order(&items, &order, |item| *item);
        assert_eq!(sorted, [&"c", &"d", &"b", &"a"]);
    }
}
