//! Parser for JVMS §4.7.9.1 generic signatures.
//!
//! Turns the `Signature` attribute of classes and methods into the core's
//! type representation. Binary class names become dotted qualified names,
//! nested segments keep their `$` separator.

use builderscope_core::error::{CoreError, Result};
use builderscope_core::model::{TypeParameter, TypeRef};

/// Parsed class signature: type parameters plus generic supertypes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassSignature {
    pub type_parameters: Vec<TypeParameter>,
    pub superclass: TypeRef,
    pub interfaces: Vec<TypeRef>,
}

/// Parsed method signature. Throws clauses are not retained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSignature {
    pub type_parameters: Vec<TypeParameter>,
    pub parameters: Vec<TypeRef>,
    pub return_type: TypeRef,
}

pub fn parse_class_signature(signature: &str) -> Result<ClassSignature> {
    let mut parser = Parser::new(signature);
    let type_parameters = parser.parse_type_parameters()?;
    let superclass = parser.parse_class_type()?;
    let mut interfaces = Vec::new();
    while !parser.at_end() {
        interfaces.push(parser.parse_class_type()?);
    }
    Ok(ClassSignature {
        type_parameters,
        superclass,
        interfaces,
    })
}

pub fn parse_method_signature(signature: &str) -> Result<MethodSignature> {
    let mut parser = Parser::new(signature);
    let type_parameters = parser.parse_type_parameters()?;
    parser.expect(b'(')?;
    let mut parameters = Vec::new();
    while parser.peek() != Some(b')') {
        parameters.push(parser.parse_java_type()?);
    }
    parser.expect(b')')?;
    let return_type = if parser.peek() == Some(b'V') {
        parser.advance();
        TypeRef::primitive("void")
    } else {
        parser.parse_java_type()?
    };
    // Remaining input can only be throws clauses; they are irrelevant here.
    Ok(MethodSignature {
        type_parameters,
        parameters,
        return_type,
    })
}

struct Parser<'a> {
    signature: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(signature: &'a str) -> Self {
        Parser {
            signature,
            bytes: signature.as_bytes(),
            pos: 0,
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        Some(byte)
    }

    fn expect(&mut self, expected: u8) -> Result<()> {
        match self.advance() {
            Some(byte) if byte == expected => Ok(()),
            _ => Err(self.malformed()),
        }
    }

    fn malformed(&self) -> CoreError {
        CoreError::UnresolvableType {
            type_name: self.signature.to_string(),
            context: format!("generic signature (at offset {})", self.pos),
        }
    }

    /// `<T:Ljava/lang/Object;U::Lfoo/Bar;>` or nothing.
    fn parse_type_parameters(&mut self) -> Result<Vec<TypeParameter>> {
        if self.peek() != Some(b'<') {
            return Ok(Vec::new());
        }
        self.advance();
        let mut parameters = Vec::new();
        while self.peek() != Some(b'>') {
            let name = self.parse_identifier(b':')?;
            let mut bounds = Vec::new();
            // Class bound, possibly empty.
            self.expect(b':')?;
            if !matches!(self.peek(), Some(b':') | Some(b'>') | None) {
                bounds.push(self.parse_reference_type()?);
            }
            // Interface bounds.
            while self.peek() == Some(b':') {
                self.advance();
                bounds.push(self.parse_reference_type()?);
            }
            parameters.push(TypeParameter { name, bounds });
        }
        self.expect(b'>')?;
        Ok(parameters)
    }

    /// Identifier terminated by (not including) `terminator`.
    fn parse_identifier(&mut self, terminator: u8) -> Result<String> {
        let start = self.pos;
        while let Some(byte) = self.peek() {
            if byte == terminator {
                break;
            }
            self.pos += 1;
        }
        if self.pos == start || self.at_end() {
            return Err(self.malformed());
        }
        Ok(self.signature[start..self.pos].to_string())
    }

    /// ClassTypeSignature | TypeVariableSignature | ArrayTypeSignature
    fn parse_reference_type(&mut self) -> Result<TypeRef> {
        match self.peek() {
            Some(b'L') => self.parse_class_type(),
            Some(b'T') => self.parse_type_variable(),
            Some(b'[') => self.parse_array_type(),
            _ => Err(self.malformed()),
        }
    }

    /// Reference type or primitive base type.
    fn parse_java_type(&mut self) -> Result<TypeRef> {
        match self.peek() {
            Some(b'L') | Some(b'T') | Some(b'[') => self.parse_reference_type(),
            Some(base) => {
                let name = primitive_name(base).ok_or_else(|| self.malformed())?;
                self.advance();
                Ok(TypeRef::primitive(name))
            }
            None => Err(self.malformed()),
        }
    }

    fn parse_type_variable(&mut self) -> Result<TypeRef> {
        self.expect(b'T')?;
        let name = self.parse_identifier(b';')?;
        self.expect(b';')?;
        Ok(TypeRef::variable(name))
    }

    fn parse_array_type(&mut self) -> Result<TypeRef> {
        let mut dimensions = 0usize;
        while self.peek() == Some(b'[') {
            self.advance();
            dimensions += 1;
        }
        let element = self.parse_java_type()?;
        Ok(TypeRef::array(element, dimensions))
    }

    /// `Lcom/foo/Outer<TT;>.Inner<*>;` and friends.
    ///
    /// The qualified name joins nested segments with `$`; the type arguments
    /// of the final segment win (arguments of enclosing segments of an inner
    /// class are not representable on a single reference and are dropped).
    fn parse_class_type(&mut self) -> Result<TypeRef> {
        self.expect(b'L')?;
        let mut name = String::new();
        let mut args: Vec<TypeRef> = Vec::new();
        loop {
            let segment_start = self.pos;
            while let Some(byte) = self.peek() {
                if matches!(byte, b'<' | b';' | b'.') {
                    break;
                }
                self.pos += 1;
            }
            if self.pos == segment_start {
                return Err(self.malformed());
            }
            let segment = &self.signature[segment_start..self.pos];
            if name.is_empty() {
                name.push_str(&segment.replace('/', "."));
            } else {
                name.push('$');
                name.push_str(segment);
            }
            match self.advance() {
                Some(b'<') => {
                    args = self.parse_type_arguments()?;
                    match self.advance() {
                        Some(b';') => break,
                        Some(b'.') => {
                            args.clear();
                            continue;
                        }
                        _ => return Err(self.malformed()),
                    }
                }
                Some(b';') => break,
                Some(b'.') => continue,
                _ => return Err(self.malformed()),
            }
        }
        if args.is_empty() {
            Ok(TypeRef::class(name))
        } else {
            Ok(TypeRef::generic(TypeRef::class(name), args))
        }
    }

    /// Arguments between `<` and `>`; the opening `<` is already consumed.
    fn parse_type_arguments(&mut self) -> Result<Vec<TypeRef>> {
        let mut args = Vec::new();
        while self.peek() != Some(b'>') {
            let arg = match self.peek() {
                Some(b'*') => {
                    self.advance();
                    TypeRef::unbounded_wildcard()
                }
                Some(b'+') => {
                    self.advance();
                    TypeRef::Wildcard {
                        bound: Some(Box::new(self.parse_reference_type()?)),
                        is_upper: true,
                    }
                }
                Some(b'-') => {
                    self.advance();
                    TypeRef::Wildcard {
                        bound: Some(Box::new(self.parse_reference_type()?)),
                        is_upper: false,
                    }
                }
                _ => self.parse_reference_type()?,
            };
            args.push(arg);
        }
        self.expect(b'>')?;
        Ok(args)
    }
}

fn primitive_name(byte: u8) -> Option<&'static str> {
    match byte {
        b'B' => Some("byte"),
        b'C' => Some("char"),
        b'D' => Some("double"),
        b'F' => Some("float"),
        b'I' => Some("int"),
        b'J' => Some("long"),
        b'S' => Some("short"),
        b'Z' => Some("boolean"),
        _ => None,
    }
}
