use std::cmp::Ordering;

const NUM_OF_OPERATIONS: usize = 10_000;
const NUM_OF_REMOVALS: i32 = 1000;
const VALUES: [i32; 14] = [2, 13, 10, 5, 12, 7, 17, 18, 37, 29, 11, 14, 15, 16];
const SORTED_VALUES: [i32; 14] = [2, 5, 7, 10, 11, 12, 13, 14, 15, 16, 17, 18, 29, 37];
const EXTENDED_VALUES: [i32; 17] = [2, 4, 5, 6, 7, 10, 11, 12, 13, 14, 15, 16, 17, 18, 29, 37, 42];
const POSTORDER_VALUES: [i32; 17] = [4, 2, 6, 7, 5, 11, 12, 10, 14, 16, 17, 15, 29, 42, 37, 18, 13];

#[derive(Clone, Copy, Debug)]
pub struct Real(f32);

impl PartialEq for Real {
    fn eq(&self, other: &Real) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Real {}

impl PartialOrd for Real {
    fn partial_cmp(&self, other: &Real) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Real {
    fn cmp(&self, other: &Real) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl PartialEq<Real> for i32 {
    fn eq(&self, other: &Real) -> bool {
        *self as f32 == other.0
    }
}

impl PartialOrd<Real> for i32 {
    fn partial_cmp(&self, other: &Real) -> Option<Ordering> {
        (*self as f32).partial_cmp(&other.0)
    }
}

macro_rules! bst_set_tests {
    ($($module_name:ident: $type_name:ident$(,)*)*) => {
        $(
            mod $module_name {
                use balanced_collections::$module_name::$type_name;
                use balanced_collections::avl_tree::AvlSet as RealSet;
                use rand::Rng;
                use serde_test::{assert_tokens, Token};
                use std::collections::BTreeSet;
                use std::mem;
                use super::{
                    Real,
                    EXTENDED_VALUES,
                    NUM_OF_OPERATIONS,
                    NUM_OF_REMOVALS,
                    POSTORDER_VALUES,
                    SORTED_VALUES,
                    VALUES,
                };

                fn sample() -> $type_name<i32> {
                    let mut set: $type_name<i32> = VALUES.iter().cloned().collect();
                    set.insert(4);
                    set.insert(6);
                    set.insert(42);
                    set
                }

                fn items(set: &$type_name<i32>) -> Vec<i32> {
                    set.iter().cloned().collect()
                }

                #[test]
                fn int_test_insert() {
                    let set: $type_name<i32> = VALUES.iter().cloned().collect();
                    assert_eq!(set.validate(), Ok(()));
                    assert_eq!(set.len(), VALUES.len());
                    assert_eq!(items(&set), SORTED_VALUES.to_vec());
                }

                #[test]
                fn int_test_duplicate_insert() {
                    let mut set: $type_name<i32> = VALUES.iter().cloned().collect();
                    let postorder = set.postorder().cloned().collect::<Vec<i32>>();
                    for _ in 0..3 {
                        assert!(!set.insert(2));
                    }
                    assert!(set.is_valid());
                    assert_eq!(items(&set), SORTED_VALUES.to_vec());
                    assert_eq!(set.postorder().cloned().collect::<Vec<i32>>(), postorder);
                }

                #[test]
                fn int_test_postorder() {
                    let set = sample();
                    assert!(set.is_valid());
                    assert_eq!(items(&set), EXTENDED_VALUES.to_vec());
                    assert_eq!(
                        set.postorder().cloned().collect::<Vec<i32>>(),
                        POSTORDER_VALUES.to_vec(),
                    );
                }

                #[test]
                fn int_test_interrupted_iteration() {
                    let mut set: $type_name<i32> = VALUES.iter().cloned().collect();
                    assert_eq!(
                        set.iter().take_while(|item| **item != 5).collect::<Vec<&i32>>(),
                        vec![&2],
                    );

                    set.insert(4);
                    set.insert(6);
                    set.insert(42);
                    assert_eq!(items(&set), EXTENDED_VALUES.to_vec());
                    assert_eq!((&set).into_iter().count(), EXTENDED_VALUES.len());

                    assert_eq!(
                        set.postorder()
                            .take_while(|item| **item != 37)
                            .cloned()
                            .collect::<Vec<i32>>(),
                        POSTORDER_VALUES[..14].to_vec(),
                    );
                    assert_eq!(
                        set.postorder().cloned().collect::<Vec<i32>>(),
                        POSTORDER_VALUES.to_vec(),
                    );
                }

                #[test]
                fn int_test_search() {
                    let set = sample();
                    assert!(set.contains(&29));
                    assert!(!set.contains(&30));
                    assert_eq!(set.min(), Some(&2));
                    assert_eq!(set.max(), Some(&42));
                }

                #[test]
                fn int_test_intersect() {
                    let set = sample();
                    let other: $type_name<i32> = vec![-1, 800, 12, 10, 3, 42, 7, 16, 15]
                        .into_iter()
                        .collect();
                    let intersection = set.intersect(&other);
                    assert!(other.is_valid());
                    assert!(intersection.is_valid());
                    assert_eq!(items(&intersection), vec![7, 10, 12, 15, 16, 42]);
                }

                #[test]
                fn int_test_intersect_floats() {
                    let set = sample();
                    let floats: RealSet<Real> = vec![0.1, 3.25, -1.0, 2.75, 7.0, 10.0, 12.0]
                        .into_iter()
                        .map(Real)
                        .collect();
                    let intersection = set.intersect(&floats);
                    assert!(floats.is_valid());
                    assert!(intersection.is_valid());
                    assert_eq!(items(&intersection), vec![7, 10, 12]);
                }

                #[test]
                fn int_test_intersect_empty() {
                    let set = sample();
                    let empty: $type_name<i32> = $type_name::new();
                    assert!(set.intersect(&empty).is_empty());
                    assert!(empty.intersect(&set).is_empty());
                }

                #[test]
                fn int_test_clear() {
                    let mut set = sample();
                    set.clear();
                    assert!(set.is_valid());
                    assert!(set.is_empty());
                    assert_eq!(set.iter().next(), None);
                    set.insert(1);
                    assert_eq!(items(&set), vec![1]);
                }

                #[test]
                fn int_test_remove_cases() {
                    let mut set = $type_name::new();

                    set.insert(1);
                    assert_eq!(set.remove(&0), None);
                    assert!(set.is_valid());
                    assert_eq!(items(&set), vec![1]);

                    assert_eq!(set.remove(&1), Some(1));
                    assert!(set.is_valid());
                    assert!(set.is_empty());

                    set.insert(1);
                    set.insert(2);
                    set.remove(&1);
                    assert!(set.is_valid());
                    assert_eq!(items(&set), vec![2]);

                    set.insert(1);
                    set.remove(&2);
                    assert!(set.is_valid());
                    assert_eq!(items(&set), vec![1]);

                    set.insert(0);
                    set.insert(2);
                    set.remove(&1);
                    assert!(set.is_valid());
                    assert_eq!(items(&set), vec![0, 2]);

                    set.insert(5);
                    set.remove(&5);
                    assert!(set.is_valid());
                    assert_eq!(items(&set), vec![0, 2]);

                    set.insert(5);
                    set.insert(4);
                    set.remove(&5);
                    assert!(set.is_valid());
                    assert_eq!(items(&set), vec![0, 2, 4]);

                    set.insert(5);
                    set.remove(&4);
                    assert!(set.is_valid());
                    assert_eq!(items(&set), vec![0, 2, 5]);

                    set.insert(4);
                    set.insert(6);
                    set.remove(&5);
                    assert!(set.is_valid());
                    assert_eq!(items(&set), vec![0, 2, 4, 6]);
                }

                #[test]
                fn int_test_remove_each_ascending() {
                    for i in 0..NUM_OF_REMOVALS {
                        let mut set: $type_name<i32> = (0..NUM_OF_REMOVALS).collect();
                        assert_eq!(set.remove(&i), Some(i));
                        assert_eq!(set.validate(), Ok(()));
                        assert_eq!(
                            items(&set),
                            (0..NUM_OF_REMOVALS).filter(|j| *j != i).collect::<Vec<i32>>(),
                        );
                    }
                }

                #[test]
                fn int_test_remove_each_descending() {
                    for i in 0..NUM_OF_REMOVALS {
                        let mut set: $type_name<i32> = (0..NUM_OF_REMOVALS).rev().collect();
                        assert_eq!(set.remove(&i), Some(i));
                        assert_eq!(set.validate(), Ok(()));
                        assert_eq!(
                            items(&set),
                            (0..NUM_OF_REMOVALS).filter(|j| *j != i).collect::<Vec<i32>>(),
                        );
                    }
                }

                #[test]
                fn int_test_remove_all() {
                    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
                    let mut values = (0..NUM_OF_REMOVALS).collect::<Vec<i32>>();
                    let mut set: $type_name<i32> = values.iter().cloned().collect();
                    rng.shuffle(&mut values);

                    for value in &values {
                        assert_eq!(set.remove(value), Some(*value));
                        assert!(set.is_valid());
                    }
                    assert!(set.is_empty());
                    assert_eq!(set.len(), 0);
                }

                #[test]
                fn int_test_random_operations() {
                    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
                    let mut set = $type_name::new();
                    let mut expected = BTreeSet::new();

                    for i in 0..NUM_OF_OPERATIONS {
                        let key = rng.gen_range(0, 1000u32);
                        if rng.gen_range(0, 3) == 0 {
                            assert_eq!(set.remove(&key), expected.take(&key));
                        } else {
                            assert_eq!(set.insert(key), expected.insert(key));
                        }

                        if i % 100 == 0 {
                            assert_eq!(set.validate(), Ok(()));
                        }
                    }

                    assert_eq!(set.validate(), Ok(()));
                    assert_eq!(set.len(), expected.len());
                    assert_eq!(
                        set.iter().collect::<Vec<&u32>>(),
                        expected.iter().collect::<Vec<&u32>>(),
                    );
                }

                #[test]
                fn int_test_strings() {
                    let mut set = $type_name::new();
                    for name in &["Charlie", "Bob", "Aaron", "Xavier", "Yolanda", "Zoe"] {
                        set.insert(name.to_string());
                    }
                    assert!(set.is_valid());
                    assert!(set.contains("Bob"));
                    assert_eq!(set.remove("Xavier"), Some(String::from("Xavier")));
                    assert_eq!(
                        set.iter().map(String::as_str).collect::<Vec<&str>>(),
                        vec!["Aaron", "Bob", "Charlie", "Yolanda", "Zoe"],
                    );
                }

                #[test]
                fn int_test_clone() {
                    let mut set = sample();
                    let cloned = set.clone();
                    assert_eq!(
                        cloned.postorder().collect::<Vec<&i32>>(),
                        set.postorder().collect::<Vec<&i32>>(),
                    );

                    set.remove(&13);
                    set.insert(100);
                    assert!(cloned.is_valid());
                    assert_eq!(items(&cloned), EXTENDED_VALUES.to_vec());
                    assert_ne!(set, cloned);
                }

                #[test]
                fn int_test_move() {
                    let mut set = sample();
                    let moved = mem::take(&mut set);
                    assert!(set.is_empty());
                    assert!(set.is_valid());
                    assert_eq!(items(&moved), EXTENDED_VALUES.to_vec());

                    let set = moved;
                    assert!(set.is_valid());
                    assert_eq!(set.len(), EXTENDED_VALUES.len());
                }

                #[test]
                fn int_test_into_postorder() {
                    let set = sample();
                    let mut iter = set.into_postorder();
                    assert_eq!(iter.len(), POSTORDER_VALUES.len());
                    assert_eq!(iter.next(), Some(4));
                    assert_eq!(iter.len(), POSTORDER_VALUES.len() - 1);
                    assert_eq!(iter.collect::<Vec<i32>>(), POSTORDER_VALUES[1..].to_vec());
                }

                #[test]
                fn int_test_with_chunk_size() {
                    let mut set = $type_name::with_chunk_size(1);
                    for i in 0..100 {
                        set.insert(i);
                    }
                    for i in (0..100).filter(|i| i % 2 == 0) {
                        set.remove(&i);
                    }
                    assert!(set.is_valid());
                    assert_eq!(set.len(), 50);
                    assert_eq!(set.min(), Some(&1));
                }

                #[test]
                fn int_test_serde_tokens() {
                    let set: $type_name<u32> = vec![3, 1, 2].into_iter().collect();
                    assert_tokens(
                        &set,
                        &[
                            Token::Seq { len: Some(3) },
                            Token::U32(1),
                            Token::U32(2),
                            Token::U32(3),
                            Token::SeqEnd,
                        ],
                    );
                }

                #[test]
                fn int_test_bincode() {
                    let set = sample();
                    let bytes = bincode::serialize(&set).unwrap();
                    let deserialized: $type_name<i32> = bincode::deserialize(&bytes).unwrap();
                    assert!(deserialized.is_valid());
                    assert_eq!(deserialized, set);
                }
            }
        )*
    }
}

bst_set_tests!(avl_tree: AvlSet, red_black_tree: RedBlackSet);
