use leptos::*;

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <div class="bg-base-lightest">
            <section class="grid-container usa-section">
                <div class="usa-prose">
                    <h1>"Hospital Price Transparency"</h1>
                    <h1>"TOOLS"</h1>
                    <p>
                        "The Centers for Medicare and Medicaid Services (CMS) has developed and maintains \
                         tools to support hospitals in meeting the machine-readable file (MRF) and \
                         accessibility requirements for Hospital Price Transparency."
                    </p>
                    <p>
                        "The " <strong>"online validator"</strong>
                        " tests machine readable files against the required CMS template layouts and \
                         data specifications as described at 45 CFR 180.50(c). It runs in your web \
                         browser and is recommended for nontechnical users."
                    </p>
                    <p>
                        "The " <strong>"command-line interface (CLI) validator"</strong>
                        " runs locally in a terminal against the same layouts and specifications. It is \
                         meant for technically proficient users validating multiple files or \
                         integrating the validator into a software pipeline."
                    </p>
                    <p>
                        "The " <strong>"MRF naming wizard"</strong>
                        " assists users in generating the MRF file name in accordance with the naming \
                         convention requirements (45 CFR 180.50(d)(5))."
                    </p>
                    <p>
                        "The " <strong>"TXT file generator"</strong>
                        " assists users in generating a TXT file with the required attributes of \
                         information to improve accessibility to MRFs (45 CFR 180.50(d)(6)(i))."
                    </p>
                    <hr/>
                </div>
            </section>
        </div>
    }
}
