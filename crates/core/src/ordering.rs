//! Orders `CREATE TABLE` statements (and their reverse, for `DROP`) so that
//! every foreign key is satisfied by a table already emitted, using Kahn's
//! algorithm with parse-order tie-breaking.
//!
//! Foreign keys are rendered as post-creation `ALTER TABLE` statements on
//! targets that support it, so a dependency cycle never blocks rendering —
//! it only means some tables can't be placed by dependency order and fall
//! back to parse order instead.

use std::collections::BTreeSet;

use crate::ir::{Ident, Table};

/// The result of a dependency sort: the chosen order, plus the names of any
/// tables a cycle left unresolvable by pure dependency order (empty when
/// the FK graph, minus self-loops and unknown-table references, is a DAG).
pub struct SortResult {
    pub order: Vec<Ident>,
    pub cyclic_tables: Vec<Ident>,
}

/// Returns table names in an order safe for `CREATE TABLE`: every table
/// appears after all tables it has a foreign key to, ties broken by
/// original parse order.
#[must_use]
pub fn sort_for_create(tables: &[&Table]) -> SortResult {
    let (order, cyclic) = topological_order(tables);
    SortResult {
        order: order.into_iter().map(|idx| tables[idx].name.clone()).collect(),
        cyclic_tables: cyclic.into_iter().map(|idx| tables[idx].name.clone()).collect(),
    }
}

/// The reverse of [`sort_for_create`]: safe for emitting `DROP TABLE`
/// statements without first dropping the foreign keys that reference them.
#[must_use]
pub fn sort_for_drop(tables: &[&Table]) -> SortResult {
    let mut result = sort_for_create(tables);
    result.order.reverse();
    result
}

fn topological_order(tables: &[&Table]) -> (Vec<usize>, Vec<usize>) {
    let index_by_name = tables
        .iter()
        .enumerate()
        .map(|(idx, table)| (table.name.as_str(), idx))
        .collect::<std::collections::HashMap<_, _>>();

    let mut dependencies = vec![BTreeSet::<usize>::new(); tables.len()];
    for (idx, table) in tables.iter().enumerate() {
        for foreign_key in table.foreign_keys() {
            if foreign_key.referenced_table == table.name {
                continue;
            }
            if let Some(&dependency_index) = index_by_name.get(foreign_key.referenced_table.as_str()) {
                dependencies[idx].insert(dependency_index);
            }
        }
    }

    let mut reverse_edges = vec![BTreeSet::<usize>::new(); tables.len()];
    for (idx, deps) in dependencies.iter().enumerate() {
        for &dependency in deps {
            reverse_edges[dependency].insert(idx);
        }
    }

    let mut remaining = dependencies.iter().map(BTreeSet::len).collect::<Vec<_>>();
    let mut ready = BTreeSet::<usize>::new();
    for (idx, count) in remaining.iter().enumerate() {
        if *count == 0 {
            ready.insert(idx);
        }
    }

    let mut ordered = Vec::with_capacity(tables.len());
    let mut visited = vec![false; tables.len()];
    while let Some(&idx) = ready.iter().next() {
        ready.remove(&idx);
        if visited[idx] {
            continue;
        }
        visited[idx] = true;
        ordered.push(idx);

        for &dependent in &reverse_edges[idx] {
            if remaining[dependent] == 0 {
                continue;
            }
            remaining[dependent] -= 1;
            if remaining[dependent] == 0 {
                ready.insert(dependent);
            }
        }
    }

    let mut cyclic = (0..tables.len()).filter(|idx| !visited[*idx]).collect::<Vec<_>>();
    cyclic.sort_unstable();
    ordered.extend(cyclic.iter().copied());

    (ordered, cyclic)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Constraint, ConstraintKind, ForeignKey};

    fn table_with_fk(name: &str, references: Option<&str>) -> Table {
        let mut table = Table::named(name);
        if let Some(referenced) = references {
            table.constraints.push(Constraint {
                name: None,
                kind: ConstraintKind::ForeignKey(ForeignKey {
                    columns: vec!["parent_id".to_string()],
                    referenced_table: referenced.to_string(),
                    referenced_columns: vec!["id".to_string()],
                    on_delete: None,
                    on_update: None,
                }),
            });
        }
        table
    }

    #[test]
    fn orders_parents_before_children() {
        let child = table_with_fk("orders", Some("users"));
        let parent = table_with_fk("users", None);
        let tables = vec![&child, &parent];

        let result = sort_for_create(&tables);
        assert_eq!(result.order, vec!["users".to_string(), "orders".to_string()]);
        assert!(result.cyclic_tables.is_empty());
    }

    #[test]
    fn leaves_independent_tables_in_parse_order() {
        let a = table_with_fk("a", None);
        let b = table_with_fk("b", None);
        let tables = vec![&a, &b];

        let result = sort_for_create(&tables);
        assert_eq!(result.order, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn reports_cycles_without_failing() {
        let a = table_with_fk("a", Some("b"));
        let b = table_with_fk("b", Some("a"));
        let tables = vec![&a, &b];

        let result = sort_for_create(&tables);
        assert_eq!(result.cyclic_tables.len(), 2);
        assert_eq!(result.order.len(), 2);
    }

    #[test]
    fn ignores_self_references() {
        let a = table_with_fk("a", Some("a"));
        let tables = vec![&a];
        let result = sort_for_create(&tables);
        assert!(result.cyclic_tables.is_empty());
        assert_eq!(result.order, vec!["a".to_string()]);
    }

    #[test]
    fn drop_order_is_reverse_of_create_order() {
        let child = table_with_fk("orders", Some("users"));
        let parent = table_with_fk("users", None);
        let tables = vec![&child, &parent];

        let create_order = sort_for_create(&tables).order;
        let drop_order = sort_for_drop(&tables).order;
        let mut reversed = create_order.clone();
        reversed.reverse();
        assert_eq!(drop_order, reversed);
    }
}
