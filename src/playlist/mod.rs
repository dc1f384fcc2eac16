//! Ordered song collection backed by an arena of linked slots.
//!
//! Records live in a growable `Vec` and link to their neighbors through slot
//! indices instead of pointers, so splicing stays O(1) once the target slot is
//! known. Freed slots are recycled through a free list; song IDs are not.

use crate::core::{PlaylistError, Result, Song, SongView};
use serde::Serialize;

#[derive(Debug, Clone)]
struct Node {
    song: Song,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Summary of the collection: size plus the raw first and last records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaylistInfo {
    pub size: usize,
    pub head: Option<Song>,
    pub tail: Option<Song>,
}

#[derive(Debug, Clone)]
pub struct Playlist {
    nodes: Vec<Option<Node>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
    next_id: u64,
}

impl Default for Playlist {
    fn default() -> Self {
        Self::new()
    }
}

impl Playlist {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
            next_id: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn alloc(&mut self, node: Node) -> usize {
        match self.free.pop() {
            Some(slot) => {
                self.nodes[slot] = Some(node);
                slot
            }
            None => {
                self.nodes.push(Some(node));
                self.nodes.len() - 1
            }
        }
    }

    fn mint(&mut self, name: &str, artist: &str) -> Song {
        let song = Song::new(self.next_id, name, artist);
        self.next_id += 1;
        song
    }

    fn node(&self, slot: usize) -> &Node {
        self.nodes[slot]
            .as_ref()
            .unwrap_or_else(|| unreachable!("dangling playlist slot {slot}"))
    }

    /// Inserts a new song at position 0, shifting everything else one later.
    pub fn push_front(&mut self, name: &str, artist: &str) -> Song {
        let song = self.mint(name, artist);
        let slot = self.alloc(Node {
            song: song.clone(),
            prev: None,
            next: self.head,
        });
        match self.head {
            Some(old_head) => {
                self.nodes[old_head].as_mut().unwrap().prev = Some(slot);
            }
            None => self.tail = Some(slot),
        }
        self.head = Some(slot);
        self.len += 1;
        song
    }

    /// Inserts a new song after the current last element. O(1) via the tail handle.
    pub fn push_back(&mut self, name: &str, artist: &str) -> Song {
        let song = self.mint(name, artist);
        let slot = self.alloc(Node {
            song: song.clone(),
            prev: self.tail,
            next: None,
        });
        match self.tail {
            Some(old_tail) => {
                self.nodes[old_tail].as_mut().unwrap().next = Some(slot);
            }
            None => self.head = Some(slot),
        }
        self.tail = Some(slot);
        self.len += 1;
        song
    }

    /// Inserts at a 0-indexed position; `0` behaves like [`push_front`] and
    /// `len` like [`push_back`]. Positions outside `0..=len` leave the
    /// collection untouched and fail with `InvalidPosition`.
    ///
    /// [`push_front`]: Playlist::push_front
    /// [`push_back`]: Playlist::push_back
    pub fn insert_at(&mut self, name: &str, artist: &str, position: i64) -> Result<Song> {
        if position < 0 || position as usize > self.len {
            return Err(PlaylistError::InvalidPosition {
                position,
                size: self.len,
            });
        }
        let position = position as usize;
        if position == 0 {
            return Ok(self.push_front(name, artist));
        }
        if position == self.len {
            return Ok(self.push_back(name, artist));
        }

        // Walk from the head to the node currently holding the position.
        let mut current = self.head.unwrap_or_else(|| unreachable!());
        for _ in 0..position {
            current = self.node(current).next.unwrap_or_else(|| unreachable!());
        }

        let song = self.mint(name, artist);
        let prev = self.node(current).prev;
        let slot = self.alloc(Node {
            song: song.clone(),
            prev,
            next: Some(current),
        });
        if let Some(prev) = prev {
            self.nodes[prev].as_mut().unwrap().next = Some(slot);
        }
        self.nodes[current].as_mut().unwrap().prev = Some(slot);
        self.len += 1;
        Ok(song)
    }

    /// Removes the first record whose ID matches. Absence is not an error;
    /// returns whether a record was removed.
    pub fn remove_by_id(&mut self, id: u64) -> bool {
        let mut cursor = self.head;
        while let Some(slot) = cursor {
            if self.node(slot).song.id == id {
                self.unlink(slot);
                return true;
            }
            cursor = self.node(slot).next;
        }
        false
    }

    fn unlink(&mut self, slot: usize) {
        let node = self.nodes[slot].take().unwrap_or_else(|| unreachable!());
        match node.prev {
            Some(prev) => self.nodes[prev].as_mut().unwrap().next = node.next,
            None => self.head = node.next,
        }
        match node.next {
            Some(next) => self.nodes[next].as_mut().unwrap().prev = node.prev,
            None => self.tail = node.prev,
        }
        self.free.push(slot);
        self.len -= 1;
    }

    /// Linear scan in positional order.
    pub fn get_by_id(&self, id: u64) -> Option<&Song> {
        self.iter().find(|song| song.id == id)
    }

    /// Front-to-back traversal of the raw records.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            playlist: self,
            cursor: self.head,
        }
    }

    /// Eager enumeration of render-ready views in playback order. Repeated
    /// calls re-traverse from the start; length always equals [`len`].
    ///
    /// [`len`]: Playlist::len
    pub fn songs(&self) -> Vec<SongView> {
        let mut views = Vec::with_capacity(self.len);
        let mut cursor = self.head;
        while let Some(slot) = cursor {
            let node = self.node(slot);
            views.push(SongView::new(
                &node.song,
                node.prev.is_some(),
                node.next.is_some(),
            ));
            cursor = node.next;
        }
        views
    }

    pub fn info(&self) -> PlaylistInfo {
        PlaylistInfo {
            size: self.len,
            head: self.head.map(|slot| self.node(slot).song.clone()),
            tail: self.tail.map(|slot| self.node(slot).song.clone()),
        }
    }
}

pub struct Iter<'a> {
    playlist: &'a Playlist,
    cursor: Option<usize>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Song;

    fn next(&mut self) -> Option<Self::Item> {
        let slot = self.cursor?;
        let node = self.playlist.node(slot);
        self.cursor = node.next;
        Some(&node.song)
    }
}
