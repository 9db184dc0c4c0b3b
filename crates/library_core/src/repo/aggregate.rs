//! Relation aggregator: folds flat join rows into nested aggregates.
//!
//! # Responsibility
//! - Turn `parent x child` join rows (one-to-many or many-to-many through a
//!   bridge table) into one parent value per identity with its children.
//!
//! # Invariants
//! - Parents come out in first-seen order. Rows need not be grouped or
//!   sorted by parent id.
//! - One parent value per id, built from the first row that mentions it.
//! - A parent's children hold no duplicate ids and keep first-seen order.
//! - A parent whose rows are all NULL-extended gets an empty child list.

use crate::model::book::Book;
use crate::model::comment::Comment;
use crate::model::genre::Genre;
use crate::model::{EntityId, Identified};
use std::collections::{HashMap, HashSet};

/// Parent side of a join: an identity that owns an ordered child list.
pub trait Aggregate: Identified {
    type Child: Identified;

    fn children(&self) -> &[Self::Child];
    fn children_mut(&mut self) -> &mut Vec<Self::Child>;
}

impl Aggregate for Book {
    type Child = Genre;

    fn children(&self) -> &[Genre] {
        &self.genres
    }

    fn children_mut(&mut self) -> &mut Vec<Genre> {
        &mut self.genres
    }
}

/// A comment row carries its book; the joined genres belong to that book.
impl Aggregate for Comment {
    type Child = Genre;

    fn children(&self) -> &[Genre] {
        &self.book.genres
    }

    fn children_mut(&mut self) -> &mut Vec<Genre> {
        &mut self.book.genres
    }
}

/// Incremental fold over join rows.
pub struct RelationAggregator<P: Aggregate> {
    parents: Vec<P>,
    positions: HashMap<EntityId, usize>,
    linked: HashSet<(EntityId, EntityId)>,
}

impl<P: Aggregate> Default for RelationAggregator<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Aggregate> RelationAggregator<P> {
    pub fn new() -> Self {
        Self {
            parents: Vec::new(),
            positions: HashMap::new(),
            linked: HashSet::new(),
        }
    }

    /// Consumes one join row.
    ///
    /// `build_parent` runs only when `parent_id` has not been seen yet.
    /// `child` is `None` for NULL-extended outer-join rows.
    pub fn push_row<E, F>(
        &mut self,
        parent_id: EntityId,
        build_parent: F,
        child: Option<P::Child>,
    ) -> Result<(), E>
    where
        F: FnOnce() -> Result<P, E>,
    {
        let known = self.positions.get(&parent_id).copied();
        let position = match known {
            Some(position) => position,
            None => self.insert_parent(parent_id, build_parent()?),
        };
        self.attach_child(position, parent_id, child);
        Ok(())
    }

    /// Consumes one row whose parent is already built.
    fn push_parent(&mut self, parent: P, child: Option<P::Child>) {
        let parent_id = parent.id();
        let known = self.positions.get(&parent_id).copied();
        let position = match known {
            Some(position) => position,
            None => self.insert_parent(parent_id, parent),
        };
        self.attach_child(position, parent_id, child);
    }

    /// Number of distinct parents seen so far.
    pub fn len(&self) -> usize {
        self.parents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }

    /// Returns the parents in first-seen order.
    pub fn finish(self) -> Vec<P> {
        self.parents
    }

    fn attach_child(&mut self, position: usize, parent_id: EntityId, child: Option<P::Child>) {
        if let Some(child) = child {
            if self.linked.insert((parent_id, child.id())) {
                self.parents[position].children_mut().push(child);
            }
        }
    }

    fn insert_parent(&mut self, parent_id: EntityId, mut parent: P) -> usize {
        // Children already attached by the builder count as seen.
        let mut seen = HashSet::new();
        parent
            .children_mut()
            .retain(|child| seen.insert(child.id()));
        self.linked
            .extend(seen.into_iter().map(|child_id| (parent_id, child_id)));

        let position = self.parents.len();
        self.parents.push(parent);
        self.positions.insert(parent_id, position);
        position
    }
}

/// Folds already-mapped `(parent, child)` rows.
///
/// The parent value of a repeated id is discarded; the first one wins.
pub fn aggregate_rows<P, I>(rows: I) -> Vec<P>
where
    P: Aggregate,
    I: IntoIterator<Item = (P, Option<P::Child>)>,
{
    let mut aggregator = RelationAggregator::new();
    for (parent, child) in rows {
        aggregator.push_parent(parent, child);
    }
    aggregator.finish()
}

#[cfg(test)]
mod tests {
    use super::{aggregate_rows, Aggregate, RelationAggregator};
    use crate::model::author::Author;
    use crate::model::book::Book;
    use crate::model::comment::Comment;
    use crate::model::genre::Genre;

    fn book(id: i64) -> Book {
        Book::with_id(id, format!("Book_{id}"), Author::new(1, "Author_1"), Vec::new())
    }

    fn genre(id: i64) -> Option<Genre> {
        Some(Genre::new(id, format!("Genre_{id}")))
    }

    fn genre_ids(book: &Book) -> Vec<i64> {
        book.children().iter().map(|g| g.id).collect()
    }

    #[test]
    fn empty_row_sequence_yields_no_parents() {
        let books: Vec<Book> = aggregate_rows(Vec::new());
        assert!(books.is_empty());
    }

    #[test]
    fn null_extended_rows_yield_empty_children() {
        let books = aggregate_rows(vec![(book(1), None), (book(2), genre(4))]);
        assert_eq!(books.len(), 2);
        assert!(books[0].genres.is_empty());
        assert_eq!(genre_ids(&books[1]), vec![4]);
    }

    #[test]
    fn interleaved_rows_keep_first_seen_parent_order() {
        let books = aggregate_rows(vec![
            (book(3), genre(5)),
            (book(1), genre(1)),
            (book(3), genre(6)),
            (book(1), genre(2)),
            (book(2), None),
        ]);
        let ids: Vec<i64> = books.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        assert_eq!(genre_ids(&books[0]), vec![5, 6]);
        assert_eq!(genre_ids(&books[1]), vec![1, 2]);
        assert!(books[2].genres.is_empty());
    }

    #[test]
    fn repeated_child_rows_are_collapsed() {
        let books = aggregate_rows(vec![
            (book(1), genre(2)),
            (book(1), genre(1)),
            (book(1), genre(2)),
            (book(1), None),
            (book(1), genre(1)),
        ]);
        assert_eq!(books.len(), 1);
        assert_eq!(genre_ids(&books[0]), vec![2, 1]);
    }

    #[test]
    fn same_child_may_belong_to_several_parents() {
        let books = aggregate_rows(vec![(book(1), genre(7)), (book(2), genre(7))]);
        assert_eq!(genre_ids(&books[0]), vec![7]);
        assert_eq!(genre_ids(&books[1]), vec![7]);
    }

    #[test]
    fn first_parent_value_wins_for_repeated_ids() {
        let renamed = Book::with_id(1, "Renamed", Author::new(9, "Other"), Vec::new());
        let books = aggregate_rows(vec![(book(1), None), (renamed, genre(1))]);
        assert_eq!(books[0].title, "Book_1");
        assert_eq!(books[0].author.id, 1);
        assert_eq!(genre_ids(&books[0]), vec![1]);
    }

    #[test]
    fn builder_runs_once_per_parent_and_errors_propagate() {
        let mut aggregator: RelationAggregator<Book> = RelationAggregator::new();
        let mut builds = 0;
        for child in [genre(1), genre(2), None] {
            aggregator
                .push_row(1, || -> Result<Book, String> {
                    builds += 1;
                    Ok(book(1))
                }, child)
                .unwrap();
        }
        assert_eq!(builds, 1);
        assert_eq!(aggregator.len(), 1);

        let err = aggregator
            .push_row(2, || Err("broken row".to_string()), genre(3))
            .unwrap_err();
        assert_eq!(err, "broken row");
        assert_eq!(aggregator.len(), 1);
    }

    #[test]
    fn built_and_lazily_built_rows_share_one_parent_index() {
        let mut aggregator: RelationAggregator<Book> = RelationAggregator::new();
        aggregator.push_parent(book(1), genre(1));
        aggregator
            .push_row(1, || -> Result<Book, String> { panic!("parent 1 is known") }, genre(2))
            .unwrap();
        aggregator
            .push_row(2, || -> Result<Book, String> { Ok(book(2)) }, None)
            .unwrap();
        aggregator.push_parent(book(2), genre(3));
        aggregator.push_parent(book(1), genre(1));

        let books = aggregator.finish();
        assert_eq!(books.len(), 2);
        assert_eq!(genre_ids(&books[0]), vec![1, 2]);
        assert_eq!(genre_ids(&books[1]), vec![3]);
    }

    #[test]
    fn prefilled_children_are_deduplicated_against_later_rows() {
        let mut prefilled = book(1);
        prefilled.genres = vec![Genre::new(1, "g1"), Genre::new(1, "g1 dup")];
        let books = aggregate_rows(vec![(prefilled, genre(1)), (book(1), genre(2))]);
        assert_eq!(genre_ids(&books[0]), vec![1, 2]);
    }

    #[test]
    fn comment_rows_fill_the_referenced_book_genres() {
        let comment = |id: i64| Comment::with_id(id, format!("c{id}"), book(1));
        let comments = aggregate_rows(vec![
            (comment(10), genre(1)),
            (comment(11), genre(1)),
            (comment(10), genre(2)),
            (comment(11), genre(2)),
        ]);
        assert_eq!(comments.len(), 2);
        assert_eq!(genre_ids(&comments[0].book), vec![1, 2]);
        assert_eq!(genre_ids(&comments[1].book), vec![1, 2]);
    }
}
