use balanced_collections::avl_tree::AvlSet;
use balanced_collections::linked_list::List;
use balanced_collections::red_black_tree::RedBlackSet;
use log::{error, info};
use simplelog::{Config, LevelFilter, SimpleLogger};

const VALUES: [i32; 14] = [2, 13, 10, 5, 12, 7, 17, 18, 37, 29, 11, 14, 15, 16];
const SORTED_VALUES: [i32; 14] = [2, 5, 7, 10, 11, 12, 13, 14, 15, 16, 17, 18, 29, 37];
const EXTENDED_VALUES: [i32; 17] = [2, 4, 5, 6, 7, 10, 11, 12, 13, 14, 15, 16, 17, 18, 29, 37, 42];
const POSTORDER_VALUES: [i32; 17] = [4, 2, 6, 7, 5, 11, 12, 10, 14, 16, 17, 15, 29, 42, 37, 18, 13];
const ALTERNATE_VALUES: [i32; 9] = [-1, 800, 12, 10, 3, 42, 7, 16, 15];
const NUM_OF_REMOVALS: i32 = 1000;

fn report(passed: bool, scenario: &str) {
    if passed {
        info!("passed...{}", scenario);
    } else {
        error!("failed...{}", scenario);
    }
}

fn matches<'a, I>(iter: I, expected: &[i32]) -> bool
where
    I: IntoIterator<Item = &'a i32>,
{
    iter.into_iter().eq(expected.iter())
}

macro_rules! run_tree_scenarios {
    ($type_name:ident) => {{
        info!("running {} scenarios", stringify!($type_name));

        let mut tree = $type_name::new();
        for value in VALUES.iter() {
            tree.insert(*value);
        }
        report(tree.is_valid() && matches(&tree, &SORTED_VALUES), "insert");

        tree.insert(2);
        tree.insert(2);
        tree.insert(2);
        report(
            tree.is_valid() && matches(&tree, &SORTED_VALUES),
            "duplicate insertion",
        );

        let prefix = tree
            .iter()
            .take_while(|value| **value != 5)
            .cloned()
            .collect::<Vec<i32>>();
        report(tree.is_valid() && prefix == vec![2], "interrupted iteration");

        tree.insert(4);
        tree.insert(6);
        tree.insert(42);
        report(
            tree.is_valid() && matches(tree.iter(), &EXTENDED_VALUES),
            "insert after interruption",
        );
        report(
            tree.is_valid() && matches(&tree, &EXTENDED_VALUES),
            "range-based iteration",
        );
        report(
            tree.is_valid() && matches(tree.postorder(), &POSTORDER_VALUES),
            "postorder iteration",
        );

        let prefix = tree
            .postorder()
            .take_while(|value| **value != 37)
            .cloned()
            .collect::<Vec<i32>>();
        report(
            tree.is_valid() && prefix[..] == POSTORDER_VALUES[..14],
            "interrupted postorder iteration",
        );
        report(
            tree.is_valid() && matches(tree.postorder(), &POSTORDER_VALUES),
            "iteration after postorder iteration",
        );

        report(tree.is_valid() && tree.contains(&29), "search found");
        report(tree.is_valid() && !tree.contains(&30), "search not found");

        let second: $type_name<i32> = ALTERNATE_VALUES.iter().cloned().collect();
        let intersection = tree.intersect(&second);
        report(
            second.is_valid()
                && intersection.is_valid()
                && matches(&intersection, &[7, 10, 12, 15, 16, 42]),
            "intersection",
        );

        tree.clear();
        report(tree.is_valid() && tree.is_empty(), "clear all items");

        tree.insert(1);
        tree.remove(&0);
        report(tree.is_valid() && matches(&tree, &[1]), "remove nonexistent item");

        tree.remove(&1);
        report(tree.is_valid() && tree.is_empty(), "remove root with no children");

        tree.insert(1);
        tree.insert(2);
        tree.remove(&1);
        report(tree.is_valid() && matches(&tree, &[2]), "remove root with right child");

        tree.insert(1);
        tree.remove(&2);
        report(tree.is_valid() && matches(&tree, &[1]), "remove root with left child");

        tree.insert(0);
        tree.insert(2);
        tree.remove(&1);
        report(tree.is_valid() && matches(&tree, &[0, 2]), "remove root with two children");

        tree.insert(5);
        tree.remove(&5);
        report(
            tree.is_valid() && matches(&tree, &[0, 2]),
            "remove non-root with no children",
        );

        tree.insert(5);
        tree.insert(4);
        tree.remove(&5);
        report(
            tree.is_valid() && matches(&tree, &[0, 2, 4]),
            "remove non-root with left child",
        );

        tree.insert(5);
        tree.remove(&4);
        report(
            tree.is_valid() && matches(&tree, &[0, 2, 5]),
            "remove non-root with right child",
        );

        tree.insert(4);
        tree.insert(6);
        tree.remove(&5);
        report(
            tree.is_valid() && matches(&tree, &[0, 2, 4, 6]),
            "remove non-root with two children",
        );

        let forward = (0..NUM_OF_REMOVALS).all(|i| {
            let mut tree: $type_name<i32> = (0..NUM_OF_REMOVALS).collect();
            tree.remove(&i);
            let expected = (0..NUM_OF_REMOVALS).filter(|j| *j != i).collect::<Vec<i32>>();
            tree.is_valid() && matches(&tree, &expected)
        });
        report(forward, "remove n from 1000 element tree");

        let backward = (0..NUM_OF_REMOVALS).all(|i| {
            let mut tree: $type_name<i32> = (0..NUM_OF_REMOVALS).rev().collect();
            tree.remove(&i);
            let expected = (0..NUM_OF_REMOVALS).filter(|j| *j != i).collect::<Vec<i32>>();
            tree.is_valid() && matches(&tree, &expected)
        });
        report(backward, "remove n from 1000 element tree (reverse insertion)");
    }};
}

fn run_list_scenarios() {
    info!("running List scenarios");

    let mut list: List<i32> = VALUES.iter().cloned().collect();
    report(list.is_valid() && matches(&list, &VALUES), "construction from sequence");

    list.clear();
    report(list.is_valid() && list.is_empty(), "clear");

    for value in VALUES.iter() {
        list.push_front(*value);
    }
    let mut reversed = VALUES.to_vec();
    reversed.reverse();
    report(list.is_valid() && matches(&list, &reversed), "insert");

    list.reverse();
    report(list.is_valid() && matches(&list, &VALUES), "reversal");

    list.clear();
    for value in VALUES.iter() {
        list.push_back(*value);
    }
    report(list.is_valid() && matches(&list, &VALUES), "append");

    let mut names = List::new();
    names.push_front("Charlie");
    names.push_front("Bob");
    names.push_front("Aaron");
    names.push_back("Xavier");
    names.push_back("Yolanda");
    names.push_back("Zoe");
    info!("forward: {:?}", names);
    names.reverse();
    info!("reverse: {:?}", names);
}

fn main() {
    if let Err(err) = SimpleLogger::init(LevelFilter::Info, Config::default()) {
        eprintln!("failed to initialize logger: {}", err);
    }

    run_tree_scenarios!(AvlSet);
    run_tree_scenarios!(RedBlackSet);
    run_list_scenarios();
}
