//! Chunked slab allocator that backs every container in this crate.
//!
//! Nodes never hold references to each other. They hold [`Handle`]s, which are plain indices
//! into a `TypedArena`, so a tree can keep both owning child links and non-owning parent links
//! without any `unsafe` code.

use std::mem;
use std::ops::{Index, IndexMut};

/// Number of objects per chunk used by containers constructed with `new()`.
pub const DEFAULT_CHUNK_SIZE: usize = 64;

/// A handle to an object allocated in a `TypedArena<T>`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Handle {
    chunk_index: usize,
    block_index: usize,
}

#[derive(Clone)]
enum Block<T> {
    Occupied(T),
    Vacant(Option<Handle>),
}

/// A fast, but limited allocator that only allocates a single type of object.
///
/// All objects inside the arena are dropped when the arena is dropped. Objects can be freed
/// individually, and freed blocks are threaded onto a free list that later allocations reuse.
/// When every chunk is full, another chunk is pushed so existing objects never move.
///
/// # Examples
///
/// ```
/// use balanced_collections::arena::TypedArena;
///
/// let mut arena = TypedArena::new(1024);
///
/// let x = arena.allocate(1);
/// assert_eq!(arena[x], 1);
///
/// arena[x] += 1;
/// assert_eq!(arena[x], 2);
///
/// assert_eq!(arena.free(x), 2);
/// assert!(arena.is_empty());
/// ```
#[derive(Clone)]
pub struct TypedArena<T> {
    head: Option<Handle>,
    chunks: Vec<Vec<Block<T>>>,
    chunk_size: usize,
    len: usize,
    capacity: usize,
}

impl<T> TypedArena<T> {
    fn is_valid_handle(&self, handle: Handle) -> bool {
        handle.chunk_index < self.chunks.len()
            && handle.block_index < self.chunks[handle.chunk_index].len()
    }

    /// Constructs a new, empty `TypedArena<T>` with a specific number of objects per chunk.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::arena::TypedArena;
    ///
    /// // creates a new TypedArena<T> that contains a maximum of 1024 u32's per chunk
    /// let arena: TypedArena<u32> = TypedArena::new(1024);
    /// ```
    pub fn new(chunk_size: usize) -> Self {
        assert!(chunk_size > 0, "Error: chunk size must be positive.");
        TypedArena {
            head: None,
            chunks: Vec::new(),
            chunk_size,
            len: 0,
            capacity: 0,
        }
    }

    /// Allocates an object in the typed arena and returns a `Handle` that can later be used to
    /// retrieve or free the object.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new(1024);
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.get(x), Some(&0));
    /// ```
    pub fn allocate(&mut self, value: T) -> Handle {
        self.len += 1;

        match self.head.take() {
            None => {
                if self.len > self.capacity {
                    self.chunks.push(Vec::with_capacity(self.chunk_size));
                    self.capacity += self.chunk_size;
                }
                let chunk_count = self.chunks.len();
                let last_chunk = &mut self.chunks[chunk_count - 1];
                last_chunk.push(Block::Occupied(value));
                Handle {
                    chunk_index: chunk_count - 1,
                    block_index: last_chunk.len() - 1,
                }
            },
            Some(handle) => {
                let vacant_block = mem::replace(
                    &mut self.chunks[handle.chunk_index][handle.block_index],
                    Block::Occupied(value),
                );

                match vacant_block {
                    Block::Vacant(next_handle) => {
                        self.head = next_handle;
                        handle
                    },
                    Block::Occupied(_) => panic!("Expected a vacant block."),
                }
            },
        }
    }

    /// Frees an object in the typed arena and returns the object.
    ///
    /// # Panics
    ///
    /// Panics if `handle` corresponds to an invalid or vacant block.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new(1024);
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.free(x), 0);
    /// ```
    pub fn free(&mut self, handle: Handle) -> T {
        if !self.is_valid_handle(handle) {
            panic!("Error: attempting to free invalid block.");
        }
        let block = &mut self.chunks[handle.chunk_index][handle.block_index];
        if let Block::Vacant(_) = block {
            panic!("Error: attempting to free vacant block.");
        }
        match mem::replace(block, Block::Vacant(self.head.take())) {
            Block::Occupied(value) => {
                self.len -= 1;
                self.head = Some(handle);
                value
            },
            Block::Vacant(_) => unreachable!(),
        }
    }

    /// Returns an immutable reference to an object in the typed arena. Returns `None` if the
    /// handle does not correspond to a live object.
    pub fn get(&self, handle: Handle) -> Option<&T> {
        if !self.is_valid_handle(handle) {
            return None;
        }
        match self.chunks[handle.chunk_index][handle.block_index] {
            Block::Occupied(ref value) => Some(value),
            Block::Vacant(_) => None,
        }
    }

    /// Returns a mutable reference to an object in the typed arena. Returns `None` if the
    /// handle does not correspond to a live object.
    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        if !self.is_valid_handle(handle) {
            return None;
        }
        match self.chunks[handle.chunk_index][handle.block_index] {
            Block::Occupied(ref mut value) => Some(value),
            Block::Vacant(_) => None,
        }
    }

    /// Returns the number of live objects in the typed arena.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the typed arena holds no live objects.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of objects per chunk.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }
}

impl<T> Index<Handle> for TypedArena<T> {
    type Output = T;

    fn index(&self, handle: Handle) -> &Self::Output {
        self.get(handle).expect("Error: handle does not refer to a live object.")
    }
}

impl<T> IndexMut<Handle> for TypedArena<T> {
    fn index_mut(&mut self, handle: Handle) -> &mut Self::Output {
        self.get_mut(handle).expect("Error: handle does not refer to a live object.")
    }
}
