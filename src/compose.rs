//! Function composition engine.
//!
//! Chains unary functions into a single unary function. Two layers are
//! provided:
//!
//! - A runtime layer over vectors of boxed steps ([`compose`],
//!   [`compose_rev`], [`compose_safe`]/[`pipe`], [`compose_type_safe`])
//!   for chains whose length is only known at run time. All steps share
//!   one value type; an empty chain is rejected with
//!   [`ComposeError::EmptyChain`].
//! - A static layer ([`compose2`], [`and_then2`] and the [`compose!`],
//!   [`compose_rev!`], [`pipe!`] macros) that folds heterogeneous chains
//!   at compile time; an empty invocation does not compile.
//!
//! Every combinator returns a fresh, independently invokable closure.
//! Nothing here holds shared mutable state: calling the same composed
//! function twice with the same input yields the same output.

use crate::error::ComposeError;

/// A boxed unary step over values of one type.
pub type Step<T> = Box<dyn Fn(T) -> T>;

/// An absence-aware step; `None` is the absence sentinel.
pub type SafeStep<T> = Box<dyn Fn(T) -> Option<T>>;

/// Returns the value unchanged.
pub fn identity<T>(value: T) -> T {
    value
}

/// Creates a function that ignores its input and returns `value`.
pub fn constant<T: Clone, U>(value: T) -> impl Fn(U) -> T {
    move |_| value.clone()
}

/// Composes two functions left to right: `compose2(f, g)(x) == g(f(x))`.
pub fn compose2<A, B, C, F, G>(f: F, g: G) -> impl Fn(A) -> C
where
    F: Fn(A) -> B,
    G: Fn(B) -> C,
{
    move |input| g(f(input))
}

/// Composes two absence-aware functions left to right, short-circuiting
/// on `None`.
pub fn and_then2<A, B, C, F, G>(f: F, g: G) -> impl Fn(A) -> Option<C>
where
    F: Fn(A) -> Option<B>,
    G: Fn(B) -> Option<C>,
{
    move |input| f(input).and_then(|value| g(value))
}

/// Chains `steps` into one function, applied **left to right**: the first
/// step in the vector runs first.
///
/// A single-step chain behaves as that step wrapped in a fresh closure.
///
/// # Errors
///
/// Returns [`ComposeError::EmptyChain`] for an empty vector.
///
/// # Examples
///
/// ```
/// use recompose::compose::{compose, Step};
///
/// let steps: Vec<Step<i64>> = vec![
///     Box::new(|x| x + 1),
///     Box::new(|x| x * 2),
/// ];
/// let chained = compose(steps).unwrap();
/// assert_eq!(chained(5), 12); // (5 + 1) * 2
/// ```
pub fn compose<T: 'static>(steps: Vec<Step<T>>) -> Result<impl Fn(T) -> T, ComposeError> {
    if steps.is_empty() {
        return Err(ComposeError::EmptyChain);
    }
    Ok(move |input: T| steps.iter().fold(input, |value, step| step(value)))
}

/// Chains `steps` like [`compose`] but applies them in reverse order:
/// the last step in the vector runs first.
pub fn compose_rev<T: 'static>(steps: Vec<Step<T>>) -> Result<impl Fn(T) -> T, ComposeError> {
    if steps.is_empty() {
        return Err(ComposeError::EmptyChain);
    }
    Ok(move |input: T| steps.iter().rev().fold(input, |value, step| step(value)))
}

/// Chains absence-aware steps left to right. The first step that yields
/// `None` short-circuits the pipeline; later steps are not invoked.
pub fn compose_safe<T: 'static>(
    steps: Vec<SafeStep<T>>,
) -> Result<impl Fn(T) -> Option<T>, ComposeError> {
    if steps.is_empty() {
        return Err(ComposeError::EmptyChain);
    }
    Ok(move |input: T| steps.iter().try_fold(input, |value, step| step(value)))
}

/// Pipeline-flavoured name for [`compose_safe`].
pub fn pipe<T: 'static>(steps: Vec<SafeStep<T>>) -> Result<impl Fn(T) -> Option<T>, ComposeError> {
    compose_safe(steps)
}

/// Chains `steps` left to right under a validating predicate.
///
/// The validator sees the current value before each step and the produced
/// value after the last step. Any rejection converts the pipeline result
/// to absent and stops further invocation, so a step that produces an
/// out-of-domain value never feeds the next step.
///
/// The validator must be total for in-domain values; it is consulted once
/// per step boundary.
pub fn compose_type_safe<T, V>(
    validator: V,
    steps: Vec<Step<T>>,
) -> Result<impl Fn(T) -> Option<T>, ComposeError>
where
    T: 'static,
    V: Fn(&T) -> bool + 'static,
{
    if steps.is_empty() {
        return Err(ComposeError::EmptyChain);
    }
    Ok(move |input: T| {
        let mut value = input;
        for step in steps.iter() {
            if !validator(&value) {
                log::trace!("pipeline value rejected by validator, yielding absent");
                return None;
            }
            value = step(value);
        }
        if validator(&value) {
            Some(value)
        } else {
            log::trace!("pipeline result rejected by validator, yielding absent");
            None
        }
    })
}

/// Composes unary functions **left to right** at compile time.
///
/// `compose!(f, g, h)` builds a closure equivalent to `|x| h(g(f(x)))`.
/// The chain may change type between steps. An empty invocation does not
/// compile, which is the static counterpart of
/// [`ComposeError::EmptyChain`](crate::error::ComposeError).
#[macro_export]
macro_rules! compose {
    ($f:expr $(,)?) => { $f };
    ($f:expr, $($rest:expr),+ $(,)?) => {
        $crate::compose::compose2($f, $crate::compose!($($rest),+))
    };
}

/// Composes unary functions in reverse order: `compose_rev!(f, g, h)`
/// builds `|x| f(g(h(x)))`.
#[macro_export]
macro_rules! compose_rev {
    ($f:expr $(,)?) => { $f };
    ($f:expr, $($rest:expr),+ $(,)?) => {
        $crate::compose::compose2($crate::compose_rev!($($rest),+), $f)
    };
}

/// Chains absence-aware functions left to right, short-circuiting on the
/// first `None`. Each step is `Fn(T) -> Option<U>`.
#[macro_export]
macro_rules! pipe {
    ($f:expr $(,)?) => { $f };
    ($f:expr, $($rest:expr),+ $(,)?) => {
        $crate::compose::and_then2($f, $crate::pipe!($($rest),+))
    };
}
