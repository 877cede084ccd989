//! Object → node.

use std::any::Any;

use crate::node::Node;

use super::context::Mapper;
use super::describe::{CollectionOps, Shape, TypeInfo};
use super::error::MappingError;
use super::persist::Persist;

impl Mapper<'_> {
    /// Write the fields of `object` into `node`.
    ///
    /// Scalars overwrite existing values; collections replace the whole
    /// field; objects replace the child node. Fields of `node` that `object`
    /// does not persist are left alone.
    pub fn merge_to_node<T: Persist>(&mut self, object: &T, node: &mut Node) {
        self.store_fields(object, node);
    }

    /// Store `object` into a fresh node called `name`.
    pub fn to_node<T: Persist>(&mut self, name: &str, object: &T) -> Node {
        let mut node = Node::named(name);
        self.store_fields(object, &mut node);
        node
    }

    pub(crate) fn store_fields<T: Persist>(&mut self, object: &T, node: &mut Node) {
        for field in T::fields() {
            self.enter(field.name());
            let ty = field.type_info();
            if let Err(e) = self.store_slot(field.get(object), &ty, node, field.name()) {
                self.report(e);
            }
            self.leave();
        }
    }

    fn store_slot(
        &mut self,
        value: &dyn Any,
        ty: &TypeInfo,
        node: &mut Node,
        name: &str,
    ) -> Result<(), MappingError> {
        match ty.shape() {
            Shape::Scalar => {
                let text = self.format_scalar(value, ty)?;
                node.set_value(name, text);
            }
            Shape::Object(ops) => {
                let mut child = Node::named(name);
                (ops.store)(value, &mut child, self);
                if !child.is_empty() {
                    node.set_node(name, child);
                }
            }
            Shape::Optional(ops) => {
                if let Some(inner) = (ops.get)(value) {
                    self.store_slot(inner, &(ops.inner)(), node, name)?;
                }
            }
            Shape::Collection(ops) => self.store_collection(value, ty, &ops, node, name)?,
        }
        Ok(())
    }

    fn store_collection(
        &mut self,
        value: &dyn Any,
        ty: &TypeInfo,
        ops: &CollectionOps,
        node: &mut Node,
        name: &str,
    ) -> Result<(), MappingError> {
        let element = (ops.element)();
        if element.is_collection() {
            return Err(MappingError::NestedCollection {
                type_name: ty.name(),
            });
        }

        node.clear_field(name);
        for index in 0..(ops.len)(value) {
            let Some(item) = (ops.get)(value, index) else {
                continue;
            };
            self.enter_index(index);
            if let Err(e) = self.store_element(item, &element, node, name) {
                self.report(e);
            }
            self.leave();
        }
        Ok(())
    }

    /// Append one collection element.
    ///
    /// Object elements are kept even when empty. `None` elements have no
    /// representation and are skipped, so they do not survive a round trip.
    fn store_element(
        &mut self,
        item: &dyn Any,
        element: &TypeInfo,
        node: &mut Node,
        name: &str,
    ) -> Result<(), MappingError> {
        match element.shape() {
            Shape::Scalar => {
                let text = self.format_scalar(item, element)?;
                node.add_value(name, text);
            }
            Shape::Object(ops) => {
                let mut child = Node::named(name);
                (ops.store)(item, &mut child, self);
                node.add_node(name, child);
            }
            Shape::Optional(ops) => {
                if let Some(inner) = (ops.get)(item) {
                    self.store_element(inner, &(ops.inner)(), node, name)?;
                }
            }
            Shape::Collection(_) => {
                return Err(MappingError::NestedCollection {
                    type_name: element.name(),
                });
            }
        }
        Ok(())
    }
}
