use alloc::boxed::Box;
use core::any::type_name;
use core::marker::PhantomData;
use core::ptr::NonNull;

use crate::Upcast;

// -----------------------------------------------------------------------------
// Cloner

/// Clones and destroys a `T` whose concrete type was fixed at adoption.
///
/// This is the only place the concrete type survives once the pointer has
/// been erased to `T`.
pub(crate) trait Cloner<T: ?Sized>: 'static {
    /// Deep-copies the pointee into a new allocation of the same concrete type.
    ///
    /// # Safety
    /// - `src` must point to a live value of the concrete type of this cloner.
    unsafe fn duplicate(&self, src: NonNull<T>) -> NonNull<T>;

    /// Drops the pointee and frees its allocation.
    ///
    /// # Safety
    /// - `ptr` must come from a `Box` of the concrete type of this cloner.
    /// - `ptr` must not be used afterwards.
    unsafe fn destroy(&self, ptr: NonNull<T>);

    /// Name of the concrete type.
    fn type_name(&self) -> &'static str;
}

/// Zero-sized [`Cloner`] for the concrete type `D`.
pub(crate) struct TypedCloner<D>(PhantomData<fn() -> D>);

impl<D: 'static> TypedCloner<D> {
    const INSTANCE: &'static Self = &TypedCloner(PhantomData);
}

/// Returns the capability of `D` as seen through `T`.
///
/// The capability is a static zero-sized value, so binding it never allocates.
#[inline]
pub(crate) fn cloner_of<D, T>() -> &'static dyn Cloner<T>
where
    D: Clone + Upcast<T> + 'static,
    T: ?Sized + 'static,
{
    TypedCloner::<D>::INSTANCE
}

impl<D, T> Cloner<T> for TypedCloner<D>
where
    D: Clone + Upcast<T> + 'static,
    T: ?Sized + 'static,
{
    unsafe fn duplicate(&self, src: NonNull<T>) -> NonNull<T> {
        // SAFETY: the caller guarantees `src` holds a live `D`.
        let value = unsafe { src.cast::<D>().as_ref() };
        // `clone` runs before allocating, so a panic leaks nothing.
        let copy = Box::new(value.clone());
        log::trace!("cloned `{}` behind `{}`", type_name::<D>(), type_name::<T>());
        NonNull::from(Box::leak(<D as Upcast<T>>::upcast(copy)))
    }

    unsafe fn destroy(&self, ptr: NonNull<T>) {
        // SAFETY: `ptr` was leaked from a `Box<D>` that was upcast in place.
        drop(unsafe { Box::from_raw(ptr.cast::<D>().as_ptr()) });
    }

    #[inline]
    fn type_name(&self) -> &'static str {
        type_name::<D>()
    }
}
