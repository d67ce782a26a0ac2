mod module_specifier_spec;
