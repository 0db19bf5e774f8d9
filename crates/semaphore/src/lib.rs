//! Contention token pool.
//!
//! A fixed set of mutual-exclusion tokens (modeled semaphores). Each token
//! records which process holds it. The pool is pure bookkeeping: `acquire`
//! never blocks and keeps no waiting list. Deciding who may take a token is
//! the scheduler's job.

use schedsim_types::{Pid, TokenId};
use thiserror::Error;
use tracing::trace;

/// Errors from token pool operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Token id outside the pool.
    #[error("unknown token {token} (pool has {size} tokens)")]
    UnknownToken {
        /// Requested token.
        token: TokenId,
        /// Pool size.
        size: usize,
    },
}

/// Fixed-size set of contention tokens.
#[derive(Debug, Clone, Default)]
pub struct TokenPool {
    /// token index -> current holder
    held_by: Vec<Option<Pid>>,
}

impl TokenPool {
    /// Create a pool of `size` free tokens.
    pub fn new(size: usize) -> Self {
        Self {
            held_by: vec![None; size],
        }
    }

    /// Validate a zero-based token index.
    pub fn token(&self, index: usize) -> Result<TokenId, TokenError> {
        let token = TokenId(index);
        self.check(token)?;
        Ok(token)
    }

    /// Mark `token` as held by `pid`, replacing any previous holder.
    pub fn acquire(&mut self, token: TokenId, pid: Pid) -> Result<(), TokenError> {
        self.check(token)?;
        trace!(%token, %pid, "token acquired");
        self.held_by[token.0] = Some(pid);
        Ok(())
    }

    /// Mark `token` as free.
    pub fn release(&mut self, token: TokenId) -> Result<(), TokenError> {
        self.check(token)?;
        if let Some(pid) = self.held_by[token.0].take() {
            trace!(%token, %pid, "token released");
        }
        Ok(())
    }

    /// Release `token` only if `pid` is its current holder.
    ///
    /// Returns true if the token was released.
    pub fn release_if_held_by(&mut self, token: TokenId, pid: Pid) -> Result<bool, TokenError> {
        if self.is_held_by(token, pid)? {
            self.release(token)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Current holder of `token`.
    pub fn holder(&self, token: TokenId) -> Result<Option<Pid>, TokenError> {
        self.check(token)?;
        Ok(self.held_by[token.0])
    }

    /// Check if `pid` currently holds `token`.
    pub fn is_held_by(&self, token: TokenId, pid: Pid) -> Result<bool, TokenError> {
        Ok(self.holder(token)? == Some(pid))
    }

    /// Number of tokens in the pool.
    pub fn len(&self) -> usize {
        self.held_by.len()
    }

    /// Check if the pool has no tokens.
    pub fn is_empty(&self) -> bool {
        self.held_by.is_empty()
    }

    /// Number of tokens currently held.
    pub fn held_count(&self) -> usize {
        self.held_by.iter().filter(|h| h.is_some()).count()
    }

    fn check(&self, token: TokenId) -> Result<(), TokenError> {
        if token.0 < self.held_by.len() {
            Ok(())
        } else {
            Err(TokenError::UnknownToken {
                token,
                size: self.held_by.len(),
            })
        }
    }
}
