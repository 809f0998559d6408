use super::{
    Connection, Edge, PageInfo,
    cursor::{self, EntityType},
    window::PageWindow,
};

/// Zips the windowed slice of `items` into the edges of a connection.
///
/// A failing projection fails the whole connection, no partial pages are produced.
///
/// * `items` - Full filtered and sorted result set the window was computed on.
/// * `window` - Page of `items` to assemble.
/// * `key` - Extracts the key of an item for its cursor.
/// * `entity_type` - Entity type encoded into the cursors.
/// * `project` - Projects an item into the node exposed to the caller.
pub fn assemble<T, Node, E>(
    items: &[T],
    window: &PageWindow,
    key: impl Fn(&T) -> &str,
    entity_type: EntityType,
    project: impl Fn(&T) -> Result<Node, E>,
) -> Result<Connection<Node>, E> {
    let edges = items[window.range.clone()]
        .iter()
        .map(|item| -> Result<Edge<Node>, E> {
            Ok(Edge {
                cursor: cursor::encode(entity_type, key(item)),
                node: project(item)?,
            })
        })
        .collect::<Result<Vec<Edge<Node>>, E>>()?;
    let page_info = PageInfo {
        has_next_page: window.has_next_page,
        has_previous_page: window.has_previous_page,
        start_cursor: edges
            .first()
            .map(|edge| edge.cursor.clone())
            .unwrap_or_default(),
        end_cursor: edges
            .last()
            .map(|edge| edge.cursor.clone())
            .unwrap_or_default(),
    };
    Ok(Connection {
        edges,
        page_info,
        total_count: window.total_count as u64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::{arguments::PageLimit, window::window};
    use pretty_assertions::assert_eq;

    fn items() -> Vec<String> {
        vec!["a".to_string(), "b".to_string(), "c".to_string()]
    }

    #[test]
    fn edges_carry_cursors_of_their_keys() {
        let items = items();
        let page = window(
            &items,
            |key| key.as_str(),
            EntityType::Organization,
            None,
            None,
            PageLimit::Last(2),
        );
        let connection = assemble(&items, &page, |key| key.as_str(), EntityType::Organization, |key| {
            Ok::<_, String>(key.to_uppercase())
        })
        .unwrap();
        let nodes: Vec<&str> = connection.edges.iter().map(|edge| edge.node.as_str()).collect();
        assert_eq!(nodes, vec!["B", "C"]);
        assert_eq!(connection.total_count, 3);
        assert_eq!(
            connection.page_info,
            PageInfo {
                has_next_page: false,
                has_previous_page: true,
                start_cursor: cursor::encode(EntityType::Organization, "b"),
                end_cursor: cursor::encode(EntityType::Organization, "c"),
            }
        );
    }

    #[test]
    fn empty_pages_use_empty_cursors() {
        let items: Vec<String> = Vec::new();
        let page = window(
            &items,
            |key| key.as_str(),
            EntityType::Organization,
            None,
            None,
            PageLimit::First(10),
        );
        let connection = assemble(&items, &page, |key| key.as_str(), EntityType::Organization, |key| {
            Ok::<_, String>(key.clone())
        })
        .unwrap();
        assert!(connection.edges.is_empty());
        assert_eq!(connection.total_count, 0);
        assert_eq!(connection.page_info, PageInfo::default());
    }

    #[test]
    fn failing_projection_fails_the_connection() {
        let items = items();
        let page = window(
            &items,
            |key| key.as_str(),
            EntityType::Organization,
            None,
            None,
            PageLimit::First(3),
        );
        let result = assemble(&items, &page, |key| key.as_str(), EntityType::Organization, |key| {
            if key == "b" {
                Err(format!("cannot project {}", key))
            } else {
                Ok(key.clone())
            }
        });
        assert_eq!(result, Err("cannot project b".to_string()));
    }
}
