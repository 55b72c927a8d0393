/// One lexical scope: the entities declared in it, their combined size
/// and a link to the enclosing scope.
#[derive(Debug)]
pub struct Scope<E> {
    pub flags: u32,
    entities: Vec<E>,
    size: usize,
    parent: Option<usize>,
}

impl<E> Scope<E> {
    pub fn entities(&self) -> &[E] {
        &self.entities
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn parent(&self) -> Option<usize> {
        self.parent
    }
}

/// Arena of scopes with a cursor at the innermost open one. Finished
/// scopes stay in the arena so entities remain addressable after the
/// scope closes.
#[derive(Debug)]
pub struct ScopeStack<E> {
    scopes: Vec<Scope<E>>,
    current: usize,
}

impl<E> ScopeStack<E> {
    /// Creates the stack with an open root scope.
    pub fn new() -> Self {
        ScopeStack {
            scopes: vec![Scope {
                flags: 0,
                entities: Vec::new(),
                size: 0,
                parent: None,
            }],
            current: 0,
        }
    }

    pub fn current(&self) -> &Scope<E> {
        &self.scopes[self.current]
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn scope(&self, index: usize) -> &Scope<E> {
        &self.scopes[index]
    }

    pub fn push_scope(&mut self, flags: u32) -> usize {
        let index = self.scopes.len();
        self.scopes.push(Scope {
            flags,
            entities: Vec::new(),
            size: 0,
            parent: Some(self.current),
        });
        self.current = index;
        index
    }

    /// Closes the innermost scope, making its parent current again. The
    /// root scope is never closed.
    pub fn finish_scope(&mut self) {
        if let Some(parent) = self.scopes[self.current].parent {
            self.current = parent;
        }
    }

    pub fn push_entity(&mut self, entity: E, size: usize) {
        let scope = &mut self.scopes[self.current];
        scope.entities.push(entity);
        scope.size += size;
    }

    /// The most recently declared entity, searching outwards through
    /// enclosing scopes.
    pub fn last_entity(&self) -> Option<&E> {
        self.last_entity_stop_at(0)
    }

    /// Like `last_entity` but stops after searching the scope at `stop`.
    pub fn last_entity_stop_at(&self, stop: usize) -> Option<&E> {
        let mut index = self.current;
        loop {
            let scope = &self.scopes[index];
            if let Some(entity) = scope.entities.last() {
                return Some(entity);
            }
            if index == stop {
                return None;
            }
            index = scope.parent?;
        }
    }

    /// Entities of one scope, most recent first.
    pub fn iter_entities_rev(&self, index: usize) -> impl Iterator<Item = &E> {
        self.scopes[index].entities.iter().rev()
    }
}

impl<E> Default for ScopeStack<E> {
    fn default() -> Self {
        Self::new()
    }
}
