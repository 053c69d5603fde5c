//! Processing context
//!
//! Per-call bookkeeping of the engine: live lexer instances keyed by implementation,
//! the lexer stack recording activation order, and the delegation frames.

use super::{DELEGATION_CAPACITY, LEXER_STACK_CAPACITY};
use crate::lexer::{
    DelegationMode, ImplId, Lexer, LexerImplementation, PushParser, ScanContext, ScanEvent,
};
use std::collections::HashMap;

/// Who owns a live instance.
pub(crate) enum Instance<'a> {
    /// Passed in by the caller; used, never destroyed.
    Caller(&'a mut Lexer),
    /// Created by a delegation; destroyed with the context.
    Engine(Lexer),
}

impl Instance<'_> {
    fn lexer(&self) -> &Lexer {
        match self {
            Instance::Caller(lexer) => lexer,
            Instance::Engine(lexer) => lexer,
        }
    }

    fn lexer_mut(&mut self) -> &mut Lexer {
        match self {
            Instance::Caller(lexer) => lexer,
            Instance::Engine(lexer) => lexer,
        }
    }
}

pub(crate) struct Element<'a> {
    instance: Instance<'a>,
    parser: Option<Box<dyn PushParser>>,
}

/// One pending delegation.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Frame {
    pub mode: DelegationMode,
    pub parent: ImplId,
    pub child: ImplId,
    /// Where the child started scanning
    pub start: usize,
    /// Scan limit of the parent, restored when the child is done
    pub saved_limit: usize,
    pub resume: Option<i32>,
    /// The child was created for this frame
    pub activated: bool,
}

/// Outcome of one scan call of the active lexer.
pub(crate) struct Scanned {
    pub lexer: &'static LexerImplementation,
    pub event: ScanEvent,
    pub cursor: usize,
}

pub(crate) struct ProcessingContext<'a> {
    elements: HashMap<ImplId, Element<'a>>,
    stack: Vec<ImplId>,
    active: ImplId,
    frames: Vec<Frame>,
    parser_bridge: bool,
}

impl<'a> ProcessingContext<'a> {
    /// `top` becomes the active lexer; `others` are pushed after it. An instance whose
    /// implementation is already on the stack is skipped.
    pub fn new(
        top: &'a mut Lexer,
        others: impl IntoIterator<Item = &'a mut Lexer>,
        parser_bridge: bool,
    ) -> Self {
        let active = top.implementation().id();
        let mut context = ProcessingContext {
            elements: HashMap::new(),
            stack: Vec::with_capacity(LEXER_STACK_CAPACITY),
            active,
            frames: Vec::with_capacity(DELEGATION_CAPACITY),
            parser_bridge,
        };
        context.insert(Instance::Caller(top));
        for lexer in others {
            if context.stack_is_full() {
                tracing::warn!(lexer = lexer.name(), "lexer stack full, instance ignored");
                continue;
            }
            context.insert(Instance::Caller(lexer));
        }
        context
    }

    fn insert(&mut self, instance: Instance<'a>) {
        let lexer = instance.lexer();
        let imp = lexer.implementation();
        let id = imp.id();
        if self.elements.contains_key(&id) {
            tracing::debug!(lexer = imp.name, "implementation already active, instance ignored");
            return;
        }
        let parser = if self.parser_bridge {
            imp.grammar.parser(lexer.options())
        } else {
            None
        };
        tracing::debug!(lexer = imp.name, parser = parser.is_some(), "lexer activated");
        self.stack.push(id);
        self.elements.insert(id, Element { instance, parser });
    }

    /// Create an instance of `imp` and push it on the stack.
    pub fn activate(&mut self, imp: &'static LexerImplementation) {
        self.insert(Instance::Engine(Lexer::new(imp)));
    }

    /// Pop `id` off the stack, destroying its instance if the engine created it.
    pub fn deactivate(&mut self, id: ImplId) {
        self.stack.retain(|entry| *entry != id);
        if let Some(element) = self.elements.remove(&id) {
            release(element);
        }
    }

    pub fn active(&self) -> ImplId {
        self.active
    }

    pub fn set_active(&mut self, id: ImplId) {
        self.active = id;
    }

    pub fn contains(&self, id: ImplId) -> bool {
        self.elements.contains_key(&id)
    }

    pub fn stack_is_full(&self) -> bool {
        self.stack.len() >= LEXER_STACK_CAPACITY
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn push_frame(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    pub fn pop_frame(&mut self) -> Option<Frame> {
        self.frames.pop()
    }

    pub fn name(&self, id: ImplId) -> &'static str {
        self.elements
            .get(&id)
            .map_or("", |element| element.instance.lexer().name())
    }

    /// Put `id` back into `condition`.
    pub fn resume(&mut self, id: ImplId, condition: i32) {
        if let Some(element) = self.elements.get_mut(&id) {
            element.instance.lexer_mut().state_mut().begin(condition);
        }
    }

    /// Run one scan call of the active lexer over `input[text..limit]`, continuing
    /// from `cursor`.
    pub fn scan(&mut self, input: &[u8], text: usize, cursor: usize, limit: usize) -> Option<Scanned> {
        let element = self.elements.get_mut(&self.active)?;
        let (imp, state, options) = element.instance.lexer_mut().scan_parts();
        let mut cx = ScanContext::new(input, text, limit, state, options).resuming(cursor);
        let event = imp.grammar.scan(&mut cx);
        Some(Scanned {
            lexer: imp,
            event,
            cursor: cx.cursor(),
        })
    }

    /// The push parser of the active lexer, unless the bridge is off.
    pub fn parser(&mut self) -> Option<&mut (dyn PushParser + 'static)> {
        if !self.parser_bridge {
            return None;
        }
        self.elements.get_mut(&self.active)?.parser.as_deref_mut()
    }

    /// Stop consulting push parsers for the rest of the call.
    pub fn disable_parser_bridge(&mut self) {
        self.parser_bridge = false;
    }
}

fn release(element: Element<'_>) {
    if let Instance::Engine(lexer) = element.instance {
        let name = lexer.name();
        let released = lexer.destroy(&mut |_| {});
        tracing::debug!(lexer = name, strings = released.strings, "lexer deactivated");
    }
}

impl Drop for ProcessingContext<'_> {
    fn drop(&mut self) {
        for (_, element) in self.elements.drain() {
            release(element);
        }
    }
}
