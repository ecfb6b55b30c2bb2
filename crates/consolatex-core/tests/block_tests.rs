//! Integration tests for the block container contract

use consolatex_core::{Block, BlockError, BlockErrorKind, Char, Paragraph, Selector, Word};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn word(chars: &str) -> Block {
    let mut word = Block::new(&Word);
    for c in chars.chars() {
        word.append(Block::char(c)).unwrap();
    }
    word
}

fn values(block: &Block) -> Vec<String> {
    block.iter().map(|child| child.render()).collect()
}

fn labeled_paragraph(labels: &[&str]) -> Block {
    let mut paragraph = Block::new(&Paragraph);
    for (i, label) in labels.iter().enumerate() {
        paragraph
            .append(Block::word(&format!("w{}", i)).with_label(*label))
            .unwrap();
    }
    paragraph
}

// ============================================================================
// Order Preservation
// ============================================================================

#[test]
fn test_append_preserves_call_order() {
    let blocks: Vec<Block> = "abcde".chars().map(Block::char).collect();
    let ids: Vec<_> = blocks.iter().map(Block::id).collect();

    let mut word = Block::new(&Word);
    for block in blocks {
        word.append(block).unwrap();
    }

    assert_eq!(word.size(), 5);
    for (i, id) in ids.iter().enumerate() {
        assert_eq!(word.get(i).unwrap().id(), *id);
    }
}

#[test]
fn test_new_block_is_empty() {
    let word = Block::new(&Word);
    assert!(word.is_empty());
    assert_eq!(word.size(), 0);
    assert_eq!(word.total_length(), 0);
    assert_eq!(word.label(), None);
}

// ============================================================================
// Validation Gate
// ============================================================================

#[test]
fn test_append_wrong_kind_leaves_children_unchanged() {
    let mut w = word("ab");
    let before = values(&w);

    let err = w.append(Block::word("cd")).unwrap_err();

    assert_eq!(err.kind(), BlockErrorKind::TypeMismatch);
    assert_eq!(values(&w), before);
}

#[test]
fn test_insert_wrong_kind_leaves_children_unchanged() {
    let mut w = word("ab");
    let err = w.insert(Block::text("x"), 1).unwrap_err();

    assert_eq!(err.kind(), BlockErrorKind::TypeMismatch);
    assert_eq!(values(&w), vec!["a", "b"]);
}

#[test]
fn test_set_wrong_kind_leaves_children_unchanged() {
    let mut w = word("ab");
    let first = w.get(0).unwrap().id();

    let err = w.set(0, Block::paragraph("x")).unwrap_err();

    assert_eq!(err.kind(), BlockErrorKind::TypeMismatch);
    assert_eq!(w.get(0).unwrap().id(), first);
    assert_eq!(values(&w), vec!["a", "b"]);
}

#[test]
fn test_extend_is_all_or_nothing() {
    let mut w = word("a");
    let err = w
        .extend([Block::char('b'), Block::word("c"), Block::char('d')])
        .unwrap_err();

    assert_eq!(err.kind(), BlockErrorKind::TypeMismatch);
    assert_eq!(values(&w), vec!["a"]);

    w.extend([Block::char('b'), Block::char('c')]).unwrap();
    assert_eq!(values(&w), vec!["a", "b", "c"]);
}

#[test]
fn test_leaf_cannot_hold_children() {
    let mut leaf = Block::char('q');
    let err = leaf.insert(Block::char('r'), 0).unwrap_err();
    assert_eq!(err.kind(), BlockErrorKind::InvalidConfiguration);
    assert!(leaf.is_empty());
}

#[test]
fn test_char_leaf_holds_exactly_one_character() {
    let err = Block::leaf(&Char, "hello").unwrap_err();
    assert_eq!(err.kind(), BlockErrorKind::InvalidCharacter);
    assert_eq!(Block::leaf(&Char, "h").unwrap().render(), "h");
}

#[test]
fn test_branch_kind_cannot_hold_a_value() {
    let err = Block::leaf(&Word, "ghost").unwrap_err();
    assert_eq!(err, BlockError::ValueOnBranch { kind: "WORD" });
}

#[test]
fn test_empty_char_is_rejected_by_containers() {
    let empty = Block::new(&Char);
    assert_eq!(empty.total_length(), 0);

    let mut w = word("ab");
    let err = w.append(empty).unwrap_err();

    assert_eq!(err.kind(), BlockErrorKind::InvalidCharacter);
    assert_eq!(values(&w), vec!["a", "b"]);
    assert_eq!(w.total_length(), 2);
}

// ============================================================================
// Index Rolling
// ============================================================================

#[test]
fn test_negative_indices_mirror_positive() {
    let w = word("xyz");
    let n = w.size() as isize;

    assert_eq!(w.get(-1).unwrap().id(), w.get(n - 1).unwrap().id());
    assert_eq!(w.get(-n).unwrap().id(), w.get(0).unwrap().id());
}

#[rstest]
#[case(3)]
#[case(-4)]
#[case(100)]
#[case(-100)]
fn test_out_of_range_index_fails(#[case] index: isize) {
    let mut w = word("xyz");

    assert_eq!(
        w.get(index).unwrap_err(),
        BlockError::Index { index, len: 3 }
    );
    assert_eq!(w.remove(index).unwrap_err().kind(), BlockErrorKind::Index);
    assert_eq!(
        w.set(index, Block::char('q')).unwrap_err().kind(),
        BlockErrorKind::Index
    );
    assert_eq!(w.size(), 3);
}

#[test]
fn test_remove_from_empty_fails() {
    let mut w = Block::new(&Word);
    assert_eq!(w.remove(0).unwrap_err().kind(), BlockErrorKind::Index);
    assert_eq!(w.delete(-1).unwrap_err().kind(), BlockErrorKind::Index);
}

// ============================================================================
// Label Lookup
// ============================================================================

#[test]
fn test_label_lookup_returns_first_match() {
    let mut paragraph = labeled_paragraph(&["a", "b", "a"]);
    let first_a = paragraph.get_index(0).unwrap().id();
    let second_a = paragraph.get_index(2).unwrap().id();

    assert_eq!(paragraph.get("a").unwrap().id(), first_a);

    let removed = paragraph.remove("a").unwrap();
    assert_eq!(removed.id(), first_a);
    assert_eq!(paragraph.get("a").unwrap().id(), second_a);
}

#[test]
fn test_missing_label_is_key_error() {
    let mut paragraph = labeled_paragraph(&["a"]);

    let expected = BlockError::Key {
        label: "zzz".to_string(),
    };
    assert_eq!(paragraph.get("zzz").unwrap_err(), expected);
    assert_eq!(paragraph.remove("zzz").unwrap_err(), expected);
    assert_eq!(paragraph.delete("zzz").unwrap_err(), expected);
    assert_eq!(
        paragraph.set("zzz", Block::word("x")).unwrap_err(),
        expected
    );
    assert_eq!(paragraph.size(), 1);
}

#[test]
fn test_set_by_label_replaces_first_match_only() {
    let mut paragraph = labeled_paragraph(&["a", "b", "a"]);

    let old = paragraph.set("a", Block::word("new")).unwrap();

    assert_eq!(old.render(), "w0");
    assert_eq!(values(&paragraph), vec!["new", "w1", "w2"]);
    // the replacement carries no label, so the later duplicate is reachable
    assert_eq!(paragraph.get("a").unwrap().render(), "w2");
}

#[test]
fn test_unlabeled_children_never_match() {
    let mut paragraph = Block::new(&Paragraph);
    paragraph.append(Block::word("plain")).unwrap();
    assert_eq!(paragraph.get("").unwrap_err().kind(), BlockErrorKind::Key);
}

#[test]
fn test_relabeling_changes_lookup() {
    let mut paragraph = labeled_paragraph(&["a", "b"]);
    paragraph.get_mut(1).unwrap().set_label("a");
    paragraph.get_mut(0).unwrap().clear_label();

    assert_eq!(paragraph.get("a").unwrap().render(), "w1");
    assert_eq!(paragraph.position_of_label("b"), None);
}

// ============================================================================
// Removal by Identity
// ============================================================================

#[test]
fn test_remove_by_handle_keeps_relative_order() {
    let mut w = word("abcd");
    let target = w.get(1).unwrap().id();

    let removed = w.remove(target).unwrap();

    assert_eq!(removed.id(), target);
    assert_eq!(removed.render(), "b");
    assert_eq!(values(&w), vec!["a", "c", "d"]);
    assert!(!w.contains(target));
}

#[test]
fn test_remove_by_handle_not_a_child() {
    let mut w = word("ab");
    let stranger = Block::char('a');

    let err = w.remove_block(stranger.id()).unwrap_err();

    assert_eq!(err, BlockError::NotFound { id: stranger.id() });
    assert_eq!(w.size(), 2);
}

#[test]
fn test_get_mut_by_handle_not_a_child() {
    let mut p = labeled_paragraph(&["a", "b"]);
    let stranger = Block::word("w0");

    let err = p.get_mut(stranger.id()).unwrap_err();

    assert_eq!(err, BlockError::NotFound { id: stranger.id() });
    assert_eq!(p.render(), "w0 w1");
}

#[test]
fn test_identity_is_not_structural_equality() {
    let mut w = word("aa");
    let copy = w.get(0).unwrap().clone();

    assert_eq!(copy.render(), "a");
    assert_eq!(
        w.remove(Selector::Handle(copy.id())).unwrap_err().kind(),
        BlockErrorKind::NotFound
    );
}

#[test]
fn test_reparenting_moves_child() {
    let mut from = word("ab");
    let mut to = word("xy");

    let moved = from.remove(-1).unwrap();
    let id = moved.id();
    to.insert(moved, 1).unwrap();

    assert_eq!(from.render(), "a");
    assert_eq!(to.render(), "xby");
    assert!(to.contains(id));
}

// ============================================================================
// Insert Positioning
// ============================================================================

#[rstest]
#[case(0, "!ab")]
#[case(1, "a!b")]
#[case(2, "ab!")]
#[case(7, "ab!")]
fn test_insert_after_first_k_children(#[case] after: usize, #[case] expected: &str) {
    let mut w = word("ab");
    w.insert(Block::char('!'), after).unwrap();
    assert_eq!(w.render(), expected);
}

#[test]
fn test_insert_into_empty() {
    let mut w = Block::new(&Word);
    w.insert(Block::char('x'), 3).unwrap();
    assert_eq!(w.render(), "x");
}

// ============================================================================
// Set and Delete
// ============================================================================

#[test]
fn test_set_index_replaces_single_position() {
    let mut w = word("abc");
    let old = w.set(-2, Block::char('B')).unwrap();

    assert_eq!(old.render(), "b");
    assert_eq!(w.render(), "aBc");
}

#[test]
fn test_delete_by_index_and_label() {
    let mut paragraph = labeled_paragraph(&["x", "y", "z"]);

    assert_eq!(paragraph.delete(0).unwrap().render(), "w0");
    assert_eq!(paragraph.delete("z").unwrap().render(), "w2");
    assert_eq!(values(&paragraph), vec!["w1"]);
}

#[test]
fn test_delete_rejects_handle() {
    let mut w = word("a");
    let id = w.get(0).unwrap().id();

    assert_eq!(
        w.delete(id).unwrap_err(),
        BlockError::InvalidKey {
            selector: "handle",
            operation: "delete",
        }
    );
    assert_eq!(w.size(), 1);
}

// ============================================================================
// Iteration
// ============================================================================

#[test]
fn test_iterations_are_independent() {
    let w = word("abc");

    let mut outer = w.iter();
    let first = outer.next().unwrap();
    let inner: Vec<_> = w.iter().map(Block::render).collect();
    let rest: Vec<_> = outer.map(Block::render).collect();

    assert_eq!(first.render(), "a");
    assert_eq!(inner, vec!["a", "b", "c"]);
    assert_eq!(rest, vec!["b", "c"]);
}

#[test]
fn test_iteration_is_restartable_and_sized() {
    let w = word("abcd");
    assert_eq!(w.iter().len(), 4);
    assert_eq!((&w).into_iter().count(), 4);
    assert_eq!(w.iter().rev().next().unwrap().render(), "d");

    let mut seen = 0;
    for _ in &w {
        seen += 1;
    }
    assert_eq!(seen, 4);
}

// ============================================================================
// Total Length
// ============================================================================

#[test]
fn test_total_length_counts_leaf_weight() {
    let mut paragraph = Block::new(&Paragraph);
    paragraph.append(Block::word("hello")).unwrap();
    paragraph.append(Block::word("you")).unwrap();

    // separators do not count
    assert_eq!(paragraph.size(), 2);
    assert_eq!(paragraph.total_length(), 8);
    assert_eq!(Block::char('x').total_length(), 1);
    assert_eq!(Block::text("abc").total_length(), 3);
}

// ============================================================================
// Scenario
// ============================================================================

#[test]
fn test_word_scenario() {
    let mut w = word("hi");
    assert_eq!(w.render(), "hi");

    w.remove(0).unwrap();
    assert_eq!(w.render(), "i");

    let mut rebuilt = word("hi");
    let c0 = rebuilt.get(0).unwrap().id();
    let c1 = rebuilt.get(1).unwrap().id();
    let bang = Block::char('!');
    let bang_id = bang.id();
    rebuilt.insert(bang, 1).unwrap();

    let order: Vec<_> = rebuilt.iter().map(Block::id).collect();
    assert_eq!(order, vec![c0, bang_id, c1]);

    rebuilt.remove(bang_id).unwrap();
    rebuilt.insert(Block::char('!'), 2).unwrap();
    assert_eq!(rebuilt.render(), "hi!");
}
