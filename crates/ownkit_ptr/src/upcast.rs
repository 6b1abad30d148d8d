use alloc::boxed::Box;

/// Declares that a boxed `Self` may be held behind a `Box<T>`.
///
/// [`OwningClonePtr<T>`](crate::OwningClonePtr) accepts any `D: Upcast<T>`
/// and remembers `D` so that clones and drops use the concrete type.
///
/// Every sized type upcasts to itself. For a trait-object base, use
/// [`impl_upcast!`](crate::impl_upcast), which implements this trait through an
/// unsizing coercion.
///
/// # Safety
///
/// [`upcast`](Self::upcast) must return the allocation it was given, only
/// changing its static type. The held pointer is later cast back to `Self`
/// to clone and to free it, so returning any other allocation is undefined
/// behavior.
///
/// For a sized `T`, the blanket identity impl is the only valid one.
pub unsafe trait Upcast<T: ?Sized> {
    /// Converts the box without moving the value.
    fn upcast(self: Box<Self>) -> Box<T>;
}

// SAFETY: identity, the allocation is untouched.
unsafe impl<T> Upcast<T> for T {
    #[inline(always)]
    fn upcast(self: Box<Self>) -> Box<T> {
        self
    }
}

/// Implements [`Upcast`] from one or more concrete types to a trait-object base.
///
/// # Examples
///
/// ```
/// use ownkit_ptr::{OwningClonePtr, impl_upcast};
///
/// trait Named {
///     fn name(&self) -> &str;
/// }
///
/// #[derive(Clone)]
/// struct Cat;
/// #[derive(Clone)]
/// struct Dog;
///
/// impl Named for Cat {
///     fn name(&self) -> &str { "cat" }
/// }
/// impl Named for Dog {
///     fn name(&self) -> &str { "dog" }
/// }
///
/// impl_upcast!(dyn Named => Cat, Dog);
///
/// let mut p: OwningClonePtr<dyn Named> = OwningClonePtr::from_value(Cat);
/// assert_eq!(p.name(), "cat");
///
/// p.reset_to(Box::new(Dog));
/// assert_eq!(p.name(), "dog");
/// ```
#[macro_export]
macro_rules! impl_upcast {
    ($base:ty => $($derived:ty),+ $(,)?) => {
        $(
            // SAFETY: an unsizing coercion keeps the allocation.
            unsafe impl $crate::Upcast<$base> for $derived {
                #[inline(always)]
                fn upcast(
                    self: $crate::exports::Box<Self>,
                ) -> $crate::exports::Box<$base> {
                    self
                }
            }
        )+
    };
}
