use rand::{rngs::OsRng, Rng, RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;
use replica_value::Value;
use std::cell::RefCell;

const KEY_CHARS: &str = "abcdefghijklmnopqrstuvwxyz";

/// A fuzzer for generating random values, including object graphs with
/// shared references and cycles.
///
/// Uses the xoshiro256** PRNG for reproducible random sequences when seeded.
///
/// # Examples
///
/// ```
/// use replica_util::fuzzer::Fuzzer;
///
/// let fuzzer = Fuzzer::new(Some([7u8; 32]));
///
/// let n = fuzzer.random_int(1, 10);
/// assert!(n >= 1 && n <= 10);
///
/// // A graph of 8 objects wired together at random.
/// let graph = fuzzer.random_graph(8);
/// assert!(graph.is_object());
/// ```
pub struct Fuzzer {
    /// The seed used to initialize the PRNG.
    pub seed: [u8; 32],
    rng: RefCell<Xoshiro256StarStar>,
}

impl Fuzzer {
    /// Create a new fuzzer with an optional seed.
    ///
    /// If no seed is provided, a random seed will be generated using `OsRng`.
    pub fn new(seed: Option<[u8; 32]>) -> Self {
        let seed = seed.unwrap_or_else(|| {
            let mut bytes = [0u8; 32];
            OsRng.fill_bytes(&mut bytes);
            bytes
        });

        Self {
            seed,
            rng: RefCell::new(Xoshiro256StarStar::from_seed(seed)),
        }
    }

    /// Generate a random integer in the range [min, max] (inclusive).
    pub fn random_int(&self, min: i64, max: i64) -> i64 {
        self.rng.borrow_mut().gen_range(min..=max)
    }

    /// Pick a random element from a non-empty slice.
    pub fn pick<'a, T>(&self, elements: &'a [T]) -> &'a T {
        let idx = self.rng.borrow_mut().gen_range(0..elements.len());
        &elements[idx]
    }

    /// Generate a random boolean with the given probability of being true.
    pub fn random_bool(&self, probability: f64) -> bool {
        self.rng.borrow_mut().gen_bool(probability)
    }

    /// Generate a random string of the specified length from the given characters.
    pub fn random_string(&self, len: usize, chars: &str) -> String {
        let chars: Vec<char> = chars.chars().collect();
        let mut rng = self.rng.borrow_mut();
        (0..len)
            .map(|_| chars[rng.gen_range(0..chars.len())])
            .collect()
    }

    /// A random primitive: `undefined`, `null`, a boolean, a small integer or
    /// a short string.
    pub fn random_primitive(&self) -> Value {
        match self.random_int(0, 4) {
            0 => Value::Undefined,
            1 => Value::Null,
            2 => Value::Bool(self.random_bool(0.5)),
            3 => Value::Number(self.random_int(-1000, 1000) as f64),
            _ => {
                let len = self.random_int(0, 8) as usize;
                Value::String(self.random_string(len, KEY_CHARS))
            }
        }
    }

    /// A random acyclic value nested at most `depth` objects deep. Nothing is
    /// shared between branches.
    pub fn random_tree(&self, depth: usize) -> Value {
        if depth == 0 || self.random_bool(0.3) {
            return self.random_primitive();
        }
        let len = self.random_int(0, 4) as usize;
        if self.random_bool(0.5) {
            Value::list((0..len).map(|_| self.random_tree(depth - 1)))
        } else {
            Value::record((0..len).map(|i| (self.key(i), self.random_tree(depth - 1))))
        }
    }

    /// A random graph of `nodes` records and lists (at least one), rooted at
    /// the first node. Fields point at primitives or at any node, the node
    /// itself included, so the result typically holds cycles and shared
    /// references.
    pub fn random_graph(&self, nodes: usize) -> Value {
        let pool: Vec<(Value, bool)> = (0..nodes.max(1))
            .map(|_| {
                if self.random_bool(0.5) {
                    (Value::list([]), true)
                } else {
                    (Value::empty_record(), false)
                }
            })
            .collect();

        for (node, is_list) in &pool {
            let Some(obj) = node.as_object() else {
                continue;
            };
            let fields = self.random_int(0, 4) as usize;
            for i in 0..fields {
                let value = if self.random_bool(0.4) {
                    self.pick(&pool).0.clone()
                } else {
                    self.random_primitive()
                };
                if *is_list {
                    obj.push(value);
                } else {
                    obj.set(self.key(i), value);
                }
            }
        }
        pool[0].0.clone()
    }

    fn key(&self, index: usize) -> String {
        let len = self.random_int(1, 3) as usize;
        format!("{}{}", self.random_string(len, KEY_CHARS), index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fuzzer_random_int() {
        let fuzzer = Fuzzer::new(None);

        for _ in 0..100 {
            let n = fuzzer.random_int(1, 10);
            assert!((1..=10).contains(&n));
        }
    }

    #[test]
    fn test_fuzzer_pick() {
        let fuzzer = Fuzzer::new(None);
        let choices = vec!["a", "b", "c"];

        for _ in 0..100 {
            let picked = fuzzer.pick(&choices);
            assert!(choices.contains(picked));
        }
    }

    #[test]
    fn test_fuzzer_reproducible() {
        let seed = [1u8; 32];

        let fuzzer1 = Fuzzer::new(Some(seed));
        let fuzzer2 = Fuzzer::new(Some(seed));

        // Same seed should produce same sequence
        for _ in 0..10 {
            assert_eq!(fuzzer1.random_int(0, 1000), fuzzer2.random_int(0, 1000));
        }
    }

    #[test]
    fn test_fuzzer_random_string() {
        let fuzzer = Fuzzer::new(None);

        let s = fuzzer.random_string(10, "abc");
        assert_eq!(s.len(), 10);
        assert!(s.chars().all(|c| "abc".contains(c)));
    }

    #[test]
    fn test_random_tree_respects_depth() {
        fn depth(v: &Value) -> usize {
            match v.as_object() {
                None => 0,
                Some(obj) => {
                    let keys = obj.own_keys();
                    1 + keys
                        .iter()
                        .filter_map(|k| obj.get(k.clone()))
                        .map(|child| depth(&child))
                        .max()
                        .unwrap_or(0)
                }
            }
        }

        let fuzzer = Fuzzer::new(Some([3u8; 32]));
        for _ in 0..50 {
            assert!(depth(&fuzzer.random_tree(3)) <= 3);
        }
    }

    #[test]
    fn test_random_graph_root_is_object() {
        let fuzzer = Fuzzer::new(Some([9u8; 32]));
        assert!(fuzzer.random_graph(0).is_object());
        assert!(fuzzer.random_graph(5).is_object());
    }
}
